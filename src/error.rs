use thiserror::Error;

#[derive(Debug, Error)]
pub enum VizError {
    #[error("element #{0} not found")]
    MissingElement(String),

    #[error("{0} unavailable")]
    ContextUnavailable(&'static str),

    #[error("{label} shader failed to compile: {log}")]
    ShaderCompile { label: &'static str, log: String },

    #[error("{label} program failed to link: {log}")]
    ProgramLink { label: &'static str, log: String },

    #[error("could not create {0}")]
    ResourceCreation(&'static str),

    #[error("invalid colour {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error("invalid scene config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("javascript error: {0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, VizError>;

#[cfg(target_arch = "wasm32")]
mod js {
    use wasm_bindgen::JsValue;

    use super::VizError;

    impl From<VizError> for JsValue {
        fn from(err: VizError) -> Self {
            JsValue::from_str(&err.to_string())
        }
    }

    impl From<JsValue> for VizError {
        fn from(value: JsValue) -> Self {
            VizError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
        }
    }
}
