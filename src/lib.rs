pub mod compare;
pub mod grade;
pub mod output;
pub mod parser;
pub mod reference;
pub mod series;
pub mod source;
pub mod stats;
pub mod time_codec;
