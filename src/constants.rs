//! Parametros de configuracion de la cafeteria

/// Intervalo entre pasadas periodicas del scheduler de asignacion
pub const DISPATCH_INTERVAL_MS: u64 = 30_000;

/// Intervalo entre barridos de ordenes terminadas
pub const SWEEP_INTERVAL_MS: u64 = 5_000;

/// Indica cuanto tiempo se debe de esperar (por lo menos) para imprimir por pantalla las estadisticas de la cafeteria
pub const STATISTICS_WAIT_IN_MS: u64 = 5_000;

/// Tiempo de preparacion asignado a una bebida que no figura en la tabla
pub const DEFAULT_PREP_TIME_MINUTES: i64 = 4;

/// Minutos de espera a partir de los cuales una orden saltea la heuristica de balanceo
pub const EMERGENCY_WAIT_MINUTES: i64 = 10;

/// Ratio de carga de trabajo sobre el promedio a partir del cual un barista se considera sobrecargado
pub const OVERLOADED_RATIO: f64 = 1.2;

/// Ratio de carga de trabajo sobre el promedio debajo del cual un barista se considera subutilizado
pub const UNDERUTILIZED_RATIO: f64 = 0.8;

/// Cantidad de salteos a partir de la cual se aplica la penalidad por equidad al puntaje
pub const FAIRNESS_SKIP_THRESHOLD: u32 = 3;

/// Tiempo de preparacion maximo de una orden "rapida" (para baristas sobrecargados)
pub const QUICK_PREP_MINUTES: i64 = 2;

/// Tiempo de preparacion minimo de una orden "compleja" (para baristas subutilizados)
pub const COMPLEX_PREP_MINUTES: i64 = 4;

/// Cantidad maxima de casos de prueba que genera el simulador por pedido
pub const MAX_TEST_CASES: usize = 20;
