use crate::error::MemoiraError;

pub type MemoiraResult<T> = Result<T, MemoiraError>;
