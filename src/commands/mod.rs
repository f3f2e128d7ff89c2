pub mod export;
pub mod inspect;
pub mod parse;
pub mod status;
