use thiserror::Error;

/// Errors from the arithmetic kernel (C1). Maps to the INVALID_ARGUMENT
/// error kind at the application boundary.
#[derive(Debug, Error)]
pub enum ArithmeticError {
    #[error("witness_value undefined for n <= 2 (n = {0})")]
    UndefinedWitness(String),

    #[error("divisor_sum undefined for n = 0")]
    ZeroInput,
}
