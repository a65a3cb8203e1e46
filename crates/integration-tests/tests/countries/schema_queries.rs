use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use countries_graphql::{Envelop, EnvelopConfig, Enveloped};
use integration_tests::{
    assertions::{
        assert_all_in_continent, assert_all_roots, assert_continent_shape, assert_country_core, assert_language_core,
        assert_not_found, assert_single_entity,
    },
    fixture, runner, runtime, service,
    types::{
        AllRootsQuery, ContinentShapeQuery, CountriesByContinentQuery, CountryCoreQuery, EuropeanCountriesQuery,
        LanguageCoreQuery, NotFoundQuery, SingleEntityQuery,
    },
    Error, OperationRunner,
};
use serde_json::json;

/// Counts how often a schema is handed out.
#[derive(Default)]
struct CountingEnvelop {
    calls: AtomicUsize,
}

impl Envelop for CountingEnvelop {
    fn get_enveloped(&self, config: EnvelopConfig) -> Enveloped {
        self.calls.fetch_add(1, Ordering::SeqCst);
        service().get_enveloped(config)
    }
}

fn codes<'a>(countries: impl IntoIterator<Item = &'a integration_tests::types::Country>) -> Vec<&'a str> {
    countries.into_iter().map(|country| country.code.as_str()).collect()
}

#[test]
fn fixture_declares_the_expected_operations() {
    let fixture = fixture();
    let names = fixture.registry().names().collect::<Vec<_>>();

    assert_eq!(
        names,
        [
            "AllRoots",
            "ContinentShape",
            "CountriesByContinent",
            "CountryCore",
            "EuropeanCountries",
            "LanguageCore",
            "NotFoundExample",
            "SingleEntity",
        ]
    );
}

#[test]
fn unknown_operation_is_refused_before_execution() {
    let envelop = Arc::new(CountingEnvelop::default());
    let runner = OperationRunner::new(envelop.clone(), fixture());

    let error = runtime().block_on(runner.run_operation("AllRoot")).unwrap_err();

    let message = error.to_string();
    let Error::UnknownOperation { name, known } = error else {
        unreachable!("unexpected error: {message}");
    };
    assert_eq!(name, "AllRoot");
    assert_eq!(known, fixture().registry().names().collect::<Vec<_>>());
    for known in &known {
        assert!(message.contains(known.as_str()), "{message}");
    }
    assert_eq!(envelop.calls.load(Ordering::SeqCst), 0);

    runtime().block_on(runner.run_operation("AllRoots")).unwrap();
    assert_eq!(envelop.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn every_fixture_operation_runs_without_errors() {
    let fixture = fixture();
    let runner = runner();

    runtime().block_on(async {
        for name in fixture.registry().names() {
            let result = runner.run_operation(name).await.unwrap();

            assert_eq!(result.errors, None, "{name} returned errors");
            assert!(result.data.is_some(), "{name} returned no data");
        }
    });
}

#[test]
fn all_roots_are_populated_and_stable() {
    let runner = runner();

    let (first, second) = runtime().block_on(async {
        let first = runner.run_operation_expect_data::<AllRootsQuery>("AllRoots").await.unwrap();
        let second = runner.run_operation_expect_data::<AllRootsQuery>("AllRoots").await.unwrap();
        (first, second)
    });

    assert_all_roots(&first);
    assert_all_roots(&second);

    assert_eq!(first.continents.len(), second.continents.len());
    assert_eq!(first.countries.len(), second.countries.len());
    assert_eq!(first.languages.len(), second.languages.len());

    let dataset = service().dataset();
    assert_eq!(first.continents.len(), dataset.continents().len());
    assert_eq!(first.countries.len(), dataset.countries().len());
    assert_eq!(first.languages.len(), dataset.languages().len());
}

#[test]
fn single_entity_lookups_echo_their_codes() {
    let data = runtime()
        .block_on(runner().run_operation_expect_data::<SingleEntityQuery>("SingleEntity"))
        .unwrap();

    assert_single_entity(&data, "EU", "FR", "fr");
    assert_eq!(data.continent.name, "Europe");
    assert_eq!(data.country.name, "France");
    assert_eq!(data.country.capital.as_deref(), Some("Paris"));
    assert_eq!(data.language.name, "French");
}

#[test]
fn unknown_codes_resolve_to_null() {
    let result = runtime().block_on(runner().run_operation("NotFoundExample")).unwrap();

    assert_eq!(result.errors, None);
    insta::assert_json_snapshot!(result.data, @r#"
    {
      "continent": null,
      "country": null
    }
    "#);

    let data = result.expect_data::<NotFoundQuery>().unwrap();
    assert_not_found(&data);
}

#[test]
fn continent_shape() {
    let data = runtime()
        .block_on(runner().run_operation_expect_data::<ContinentShapeQuery>("ContinentShape"))
        .unwrap();

    assert_continent_shape(&data);

    let total = data
        .continents
        .iter()
        .map(|continent| continent.countries.as_ref().map(Vec::len).unwrap_or_default())
        .sum::<usize>();
    assert_eq!(total, service().dataset().countries().len());

    let antarctica = data.continents.iter().find(|continent| continent.code == "AN").unwrap();
    assert_eq!(codes(antarctica.countries.iter().flatten()), ["AQ"]);
}

#[test]
fn country_core() {
    let data = runtime()
        .block_on(runner().run_operation_expect_data::<CountryCoreQuery>("CountryCore"))
        .unwrap();

    assert_country_core(&data);

    let us = data.countries.iter().find(|country| country.code == "US").unwrap();
    let states = us.states.as_deref().unwrap();
    assert_eq!(states.len(), 51);
    assert!(states
        .iter()
        .any(|state| state.code.as_deref() == Some("CA") && state.name == "California"));

    let antarctica = data.countries.iter().find(|country| country.code == "AQ").unwrap();
    assert_eq!(antarctica.languages.as_deref(), Some(&[][..]));
}

#[test]
fn language_core() {
    let data = runtime()
        .block_on(runner().run_operation_expect_data::<LanguageCoreQuery>("LanguageCore"))
        .unwrap();

    assert_language_core(&data);

    let french = data.languages.iter().find(|language| language.code == "fr").unwrap();
    assert_eq!(french.native.as_deref(), Some("Français"));
}

#[rstest::rstest]
#[case::europe("EU", "FR")]
#[case::asia("AS", "JP")]
#[case::antarctica("AN", "AQ")]
#[case::oceania("OC", "NZ")]
fn countries_by_continent(#[case] continent: &str, #[case] member: &str) {
    let data = runtime()
        .block_on(runner().run_operation_with_variables_expect_data::<CountriesByContinentQuery>(
            "CountriesByContinent",
            json!({ "continent": continent }),
        ))
        .unwrap();

    assert!(!data.countries.is_empty());
    assert_all_in_continent(&data.countries, continent);
    assert!(codes(&data.countries).contains(&member), "{member} missing from {continent}");

    let expected = service()
        .dataset()
        .countries_in(continent)
        .map(|country| country.code.as_str())
        .collect::<Vec<_>>();
    assert_eq!(codes(&data.countries), expected);

    let name = service().dataset().continent(continent).map(|continent| continent.name.as_str());
    assert!(data
        .countries
        .iter()
        .all(|country| country.continent.as_ref().map(|continent| continent.name.as_str()) == name));
}

#[test]
fn countries_by_continent_defaults_to_europe() {
    let runner = runner();

    let (defaulted, explicit) = runtime().block_on(async {
        let defaulted = runner
            .run_operation_expect_data::<CountriesByContinentQuery>("CountriesByContinent")
            .await
            .unwrap();
        let explicit = runner
            .run_operation_with_variables_expect_data::<CountriesByContinentQuery>(
                "CountriesByContinent",
                json!({ "continent": "EU" }),
            )
            .await
            .unwrap();
        (defaulted, explicit)
    });

    pretty_assertions::assert_eq!(codes(&defaulted.countries), codes(&explicit.countries));
}

#[test]
fn fragment_based_query_agrees_with_filter() {
    let runner = runner();

    let (european, filtered) = runtime().block_on(async {
        let european = runner
            .run_operation_expect_data::<EuropeanCountriesQuery>("EuropeanCountries")
            .await
            .unwrap();
        let filtered = runner
            .run_operation_with_variables_expect_data::<CountriesByContinentQuery>(
                "CountriesByContinent",
                json!({ "continent": "EU" }),
            )
            .await
            .unwrap();
        (european, filtered)
    });

    let continent = european.continent.unwrap();
    assert_eq!(continent.code, "EU");
    pretty_assertions::assert_eq!(codes(continent.countries.iter().flatten()), codes(&filtered.countries));
}

#[test]
fn strict_helper_escalates_errors() {
    let error = runtime()
        .block_on(runner().run_operation_with_variables_expect_data::<CountriesByContinentQuery>(
            "CountriesByContinent",
            json!({ "continent": 42 }),
        ))
        .unwrap_err();

    assert!(matches!(error, Error::ExecutionReturnedErrors(ref errors) if !errors.is_empty()), "{error}");
}

#[test]
fn strict_helper_reports_shape_mismatches() {
    let error = runtime()
        .block_on(runner().run_operation_expect_data::<SingleEntityQuery>("NotFoundExample"))
        .unwrap_err();

    assert!(matches!(error, Error::Deserialize(_)), "{error}");
}
