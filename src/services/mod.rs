pub mod index;
pub mod insights;
pub mod posters;
pub mod recommendations;
pub mod similarity;
pub mod stopwords;
pub mod tags;
pub mod vectorizer;
