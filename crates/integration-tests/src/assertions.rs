//! Shape checks over decoded operation data. A failed check panics at the caller.

use crate::types::{
    AllRootsQuery, Continent, ContinentShapeQuery, Country, CountryCoreQuery, Language, LanguageCoreQuery,
    NotFoundQuery, SingleEntityQuery, State,
};

#[track_caller]
fn assert_code_and_name(kind: &str, code: &str, name: &str) {
    assert!(!code.is_empty(), "{kind} with an empty code (name {name:?})");
    assert!(!name.is_empty(), "{kind} {code:?} has an empty name");
}

#[track_caller]
pub fn assert_continent(continent: &Continent) {
    assert_code_and_name("continent", &continent.code, &continent.name);
}

#[track_caller]
pub fn assert_country(country: &Country) {
    assert_code_and_name("country", &country.code, &country.name);
}

#[track_caller]
pub fn assert_language(language: &Language) {
    assert_code_and_name("language", &language.code, &language.name);
}

#[track_caller]
pub fn assert_state(country: &str, state: &State) {
    assert!(!state.name.is_empty(), "state of {country:?} has an empty name");

    let code = state
        .code
        .as_deref()
        .unwrap_or_else(|| panic!("state {:?} of {country:?} has no code", state.name));
    assert!(!code.is_empty(), "state {:?} of {country:?} has an empty code", state.name);
}

#[track_caller]
pub fn assert_all_roots(data: &AllRootsQuery) {
    assert!(!data.continents.is_empty(), "no continents");
    assert!(!data.countries.is_empty(), "no countries");
    assert!(!data.languages.is_empty(), "no languages");

    data.continents.iter().for_each(assert_continent);
    data.countries.iter().for_each(assert_country);
    data.languages.iter().for_each(assert_language);
}

#[track_caller]
pub fn assert_single_entity(data: &SingleEntityQuery, continent: &str, country: &str, language: &str) {
    assert_eq!(data.continent.code, continent);
    assert_eq!(data.country.code, country);
    assert_eq!(data.language.code, language);

    assert_continent(&data.continent);
    assert_country(&data.country);
    assert_language(&data.language);
}

#[track_caller]
pub fn assert_not_found(data: &NotFoundQuery) {
    assert!(data.continent.is_none(), "expected no continent, got {:?}", data.continent);
    assert!(data.country.is_none(), "expected no country, got {:?}", data.country);
}

#[track_caller]
pub fn assert_continent_shape(data: &ContinentShapeQuery) {
    assert!(!data.continents.is_empty(), "no continents");

    for continent in &data.continents {
        assert_continent(continent);

        let countries = continent
            .countries
            .as_ref()
            .unwrap_or_else(|| panic!("continent {:?} has no countries array", continent.code));
        countries.iter().for_each(assert_country);
    }

    assert!(
        data.continents
            .iter()
            .any(|continent| continent.countries.as_ref().is_some_and(|countries| !countries.is_empty())),
        "every continent has an empty countries array"
    );
}

#[track_caller]
pub fn assert_country_core(data: &CountryCoreQuery) {
    assert!(!data.countries.is_empty(), "no countries");

    for country in &data.countries {
        assert_country(country);

        let continent = country
            .continent
            .as_ref()
            .unwrap_or_else(|| panic!("country {:?} has no continent", country.code));
        assert_continent(continent);

        let languages = country
            .languages
            .as_ref()
            .unwrap_or_else(|| panic!("country {:?} has no languages array", country.code));
        languages.iter().for_each(assert_language);

        let states = country
            .states
            .as_ref()
            .unwrap_or_else(|| panic!("country {:?} has no states array", country.code));
        for state in states {
            assert_state(&country.code, state);
        }
    }

    assert!(
        data.countries
            .iter()
            .any(|country| country.languages.as_ref().is_some_and(|languages| !languages.is_empty())),
        "no country has any language"
    );

    let us = data
        .countries
        .iter()
        .find(|country| country.code == "US")
        .unwrap_or_else(|| panic!("US is missing"));
    let states = us.states.as_deref().unwrap_or_default();
    let first = states.first().unwrap_or_else(|| panic!("US has no states"));
    assert_state("US", first);
}

#[track_caller]
pub fn assert_language_core(data: &LanguageCoreQuery) {
    assert!(!data.languages.is_empty(), "no languages");
    data.languages.iter().for_each(assert_language);
}

/// Every country belongs to `continent`.
#[track_caller]
pub fn assert_all_in_continent(countries: &[Country], continent: &str) {
    for country in countries {
        assert_country(country);

        let code = country.continent.as_ref().map(|continent| continent.code.as_str());
        assert_eq!(code, Some(continent), "country {:?} is not in {continent:?}", country.code);
    }
}
