// Extraction/transform layer and shared errors/models
pub mod extractor {
    pub use crate::extractor::*;
}

pub mod parser {
    pub use crate::parser::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
