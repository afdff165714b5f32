pub type StripletResult<T> = Result<T, StripletError>;

#[derive(thiserror::Error, Debug)]
pub enum StripletError {
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    #[error("resource load error: {0}")]
    ResourceLoad(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StripletError {
    pub fn invalid_dimension(msg: impl Into<String>) -> Self {
        Self::InvalidDimension(msg.into())
    }

    pub fn resource_load(msg: impl Into<String>) -> Self {
        Self::ResourceLoad(msg.into())
    }
}
