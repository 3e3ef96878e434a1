#[cfg(feature = "parse")]
mod parse;
