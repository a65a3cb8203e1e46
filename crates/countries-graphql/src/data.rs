//! The static reference dataset served by the schema.
//!
//! The data is embedded at compile time and decoded once per process. Decoding also checks that
//! codes are unique per entity kind and that every reference from a country points at an existing
//! continent and language.

use std::collections::{hash_map::Entry, HashMap};

use serde::Deserialize;

const EMBEDDED_DATASET: &str = include_str!("../data/countries.json");

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("could not decode the dataset: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("duplicate {kind} code {code:?}")]
    DuplicateCode { kind: &'static str, code: String },
    #[error("country {country:?} references unknown continent {continent:?}")]
    UnknownContinent { country: String, continent: String },
    #[error("country {country:?} references unknown language {language:?}")]
    UnknownLanguage { country: String, language: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Continent {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
    pub native: String,
    pub phone: String,
    #[serde(rename = "continent")]
    pub continent_code: String,
    #[serde(default)]
    pub capital: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    pub emoji: String,
    #[serde(rename = "languages", default)]
    pub language_codes: Vec<String>,
    #[serde(default)]
    pub states: Vec<State>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct State {
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
    /// Filled in while indexing, the JSON nests states inside their country.
    #[serde(skip)]
    pub country_code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
    pub native: String,
    #[serde(default)]
    pub rtl: bool,
}

#[derive(Deserialize)]
struct RawDataset {
    continents: Vec<Continent>,
    countries: Vec<Country>,
    languages: Vec<Language>,
}

#[derive(Debug)]
pub struct Dataset {
    continents: Vec<Continent>,
    countries: Vec<Country>,
    languages: Vec<Language>,
    continent_by_code: HashMap<String, usize>,
    country_by_code: HashMap<String, usize>,
    language_by_code: HashMap<String, usize>,
}

impl Dataset {
    /// The dataset shipped with this crate.
    pub fn embedded() -> Result<Self, DatasetError> {
        Self::from_json(EMBEDDED_DATASET)
    }

    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let RawDataset {
            continents,
            mut countries,
            languages,
        } = serde_json::from_str(json)?;

        let continent_by_code = index("continent", continents.iter().map(|continent| &continent.code))?;
        let country_by_code = index("country", countries.iter().map(|country| &country.code))?;
        let language_by_code = index("language", languages.iter().map(|language| &language.code))?;

        for country in &mut countries {
            if !continent_by_code.contains_key(&country.continent_code) {
                return Err(DatasetError::UnknownContinent {
                    country: country.code.clone(),
                    continent: country.continent_code.clone(),
                });
            }

            if let Some(language) = country
                .language_codes
                .iter()
                .find(|code| !language_by_code.contains_key(*code))
            {
                return Err(DatasetError::UnknownLanguage {
                    country: country.code.clone(),
                    language: language.clone(),
                });
            }

            for state in &mut country.states {
                state.country_code.clone_from(&country.code);
            }
        }

        tracing::debug!(
            continents = continents.len(),
            countries = countries.len(),
            languages = languages.len(),
            "dataset loaded"
        );

        Ok(Dataset {
            continents,
            countries,
            languages,
            continent_by_code,
            country_by_code,
            language_by_code,
        })
    }

    pub fn continents(&self) -> &[Continent] {
        &self.continents
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn continent(&self, code: &str) -> Option<&Continent> {
        self.continent_by_code.get(code).map(|&idx| &self.continents[idx])
    }

    pub fn country(&self, code: &str) -> Option<&Country> {
        self.country_by_code.get(code).map(|&idx| &self.countries[idx])
    }

    pub fn language(&self, code: &str) -> Option<&Language> {
        self.language_by_code.get(code).map(|&idx| &self.languages[idx])
    }

    pub fn countries_in<'a, 'b>(&'a self, continent_code: &'b str) -> impl Iterator<Item = &'a Country> + 'b
    where
        'a: 'b,
    {
        self.countries
            .iter()
            .filter(move |country| country.continent_code == continent_code)
    }
}

fn index<'a>(
    kind: &'static str,
    codes: impl Iterator<Item = &'a String>,
) -> Result<HashMap<String, usize>, DatasetError> {
    let mut by_code = HashMap::new();

    for (idx, code) in codes.enumerate() {
        match by_code.entry(code.clone()) {
            Entry::Occupied(_) => {
                return Err(DatasetError::DuplicateCode {
                    kind,
                    code: code.clone(),
                })
            }
            Entry::Vacant(entry) => {
                entry.insert(idx);
            }
        }
    }

    Ok(by_code)
}
