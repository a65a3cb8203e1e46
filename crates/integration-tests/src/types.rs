//! Typed views of the fixture operations' `data`.
//!
//! Fields that depend on the selection set are optional, so the same types decode every
//! operation.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Continent {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub countries: Option<Vec<Country>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub native: Option<String>,
    #[serde(default)]
    pub capital: Option<String>,
    #[serde(default)]
    pub continent: Option<Box<Continent>>,
    #[serde(default)]
    pub languages: Option<Vec<Language>>,
    #[serde(default)]
    pub states: Option<Vec<State>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub native: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct State {
    pub code: Option<String>,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AllRootsQuery {
    pub continents: Vec<Continent>,
    pub countries: Vec<Country>,
    pub languages: Vec<Language>,
}

#[derive(Debug, Deserialize)]
pub struct SingleEntityQuery {
    pub continent: Continent,
    pub country: Country,
    pub language: Language,
}

#[derive(Debug, Deserialize)]
pub struct NotFoundQuery {
    pub continent: Option<Continent>,
    pub country: Option<Country>,
}

#[derive(Debug, Deserialize)]
pub struct ContinentShapeQuery {
    pub continents: Vec<Continent>,
}

#[derive(Debug, Deserialize)]
pub struct CountryCoreQuery {
    pub countries: Vec<Country>,
}

#[derive(Debug, Deserialize)]
pub struct LanguageCoreQuery {
    pub languages: Vec<Language>,
}

#[derive(Debug, Deserialize)]
pub struct CountriesByContinentQuery {
    pub countries: Vec<Country>,
}

#[derive(Debug, Deserialize)]
pub struct EuropeanCountriesQuery {
    pub continent: Option<Continent>,
}
