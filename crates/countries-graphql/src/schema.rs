use std::sync::Arc;

use async_graphql::{Context, EmptyMutation, EmptySubscription, Object, Result, ID};

use crate::{
    data::{Continent, Country, Dataset, Language, State},
    filter::{ContinentFilterInput, CountryFilterInput, LanguageFilterInput},
};

pub type CountriesSchema = async_graphql::Schema<Query, EmptyMutation, EmptySubscription>;

fn dataset<'a>(ctx: &'a Context<'_>) -> Result<&'a Dataset> {
    ctx.data::<Arc<Dataset>>().map(|dataset| dataset.as_ref())
}

#[derive(Default)]
pub struct Query;

#[Object]
impl Query {
    async fn continents<'a>(
        &self,
        ctx: &'a Context<'_>,
        #[graphql(default)] filter: ContinentFilterInput,
    ) -> Result<Vec<&'a Continent>> {
        let mut continents = Vec::new();
        for continent in dataset(ctx)?.continents() {
            if filter.matches(continent)? {
                continents.push(continent);
            }
        }
        Ok(continents)
    }

    async fn continent<'a>(&self, ctx: &'a Context<'_>, code: ID) -> Result<Option<&'a Continent>> {
        Ok(dataset(ctx)?.continent(&code))
    }

    async fn countries<'a>(
        &self,
        ctx: &'a Context<'_>,
        #[graphql(default)] filter: CountryFilterInput,
    ) -> Result<Vec<&'a Country>> {
        let mut countries = Vec::new();
        for country in dataset(ctx)?.countries() {
            if filter.matches(country)? {
                countries.push(country);
            }
        }
        Ok(countries)
    }

    async fn country<'a>(&self, ctx: &'a Context<'_>, code: ID) -> Result<Option<&'a Country>> {
        Ok(dataset(ctx)?.country(&code))
    }

    async fn languages<'a>(
        &self,
        ctx: &'a Context<'_>,
        #[graphql(default)] filter: LanguageFilterInput,
    ) -> Result<Vec<&'a Language>> {
        let mut languages = Vec::new();
        for language in dataset(ctx)?.languages() {
            if filter.matches(language)? {
                languages.push(language);
            }
        }
        Ok(languages)
    }

    async fn language<'a>(&self, ctx: &'a Context<'_>, code: ID) -> Result<Option<&'a Language>> {
        Ok(dataset(ctx)?.language(&code))
    }
}

#[Object]
impl Continent {
    async fn code(&self) -> ID {
        ID(self.code.clone())
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn countries<'a>(&self, ctx: &'a Context<'_>) -> Result<Vec<&'a Country>> {
        Ok(dataset(ctx)?
            .countries()
            .iter()
            .filter(|country| country.continent_code == self.code)
            .collect())
    }
}

#[Object]
impl Country {
    async fn code(&self) -> ID {
        ID(self.code.clone())
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn native(&self) -> &str {
        &self.native
    }

    async fn phone(&self) -> &str {
        &self.phone
    }

    async fn capital(&self) -> Option<&str> {
        self.capital.as_deref()
    }

    async fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    async fn emoji(&self) -> &str {
        &self.emoji
    }

    async fn continent<'a>(&self, ctx: &'a Context<'_>) -> Result<&'a Continent> {
        dataset(ctx)?
            .continent(&self.continent_code)
            .ok_or_else(|| format!("unknown continent {}", self.continent_code).into())
    }

    async fn languages<'a>(&self, ctx: &'a Context<'_>) -> Result<Vec<&'a Language>> {
        let dataset = dataset(ctx)?;
        Ok(self
            .language_codes
            .iter()
            .filter_map(|code| dataset.language(code))
            .collect())
    }

    async fn states(&self) -> &Vec<State> {
        &self.states
    }
}

#[Object]
impl Language {
    async fn code(&self) -> ID {
        ID(self.code.clone())
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn native(&self) -> &str {
        &self.native
    }

    async fn rtl(&self) -> bool {
        self.rtl
    }
}

#[Object]
impl State {
    async fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn country<'a>(&self, ctx: &'a Context<'_>) -> Result<&'a Country> {
        dataset(ctx)?
            .country(&self.country_code)
            .ok_or_else(|| format!("unknown country {}", self.country_code).into())
    }
}
