pub mod stemmer;
pub mod stopword;
