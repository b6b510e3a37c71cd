pub mod scoring;
pub use scoring::*;
pub mod sankoff;
pub use sankoff::*;
pub mod fitch;
pub use fitch::*;
pub mod labeller;
pub use labeller::*;
