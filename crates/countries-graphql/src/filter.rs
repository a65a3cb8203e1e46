use async_graphql::InputObject;
use regex::Regex;

#[derive(Debug, Clone, Default, InputObject)]
pub struct StringQueryOperatorInput {
    pub eq: Option<String>,
    pub ne: Option<String>,
    #[graphql(name = "in")]
    pub in_: Option<Vec<String>>,
    pub nin: Option<Vec<String>>,
    pub regex: Option<String>,
}

impl StringQueryOperatorInput {
    /// All set operators must match. A missing value only satisfies the negative operators.
    pub fn matches(&self, value: Option<&str>) -> Result<bool, regex::Error> {
        if let Some(eq) = &self.eq {
            if value != Some(eq.as_str()) {
                return Ok(false);
            }
        }

        if let Some(ne) = &self.ne {
            if value == Some(ne.as_str()) {
                return Ok(false);
            }
        }

        if let Some(candidates) = &self.in_ {
            if !value.is_some_and(|value| candidates.iter().any(|candidate| candidate == value)) {
                return Ok(false);
            }
        }

        if let Some(candidates) = &self.nin {
            if value.is_some_and(|value| candidates.iter().any(|candidate| candidate == value)) {
                return Ok(false);
            }
        }

        if let Some(pattern) = &self.regex {
            let Some(value) = value else {
                return Ok(false);
            };

            if !Regex::new(pattern)?.is_match(value) {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

fn matches_optional(operator: Option<&StringQueryOperatorInput>, value: Option<&str>) -> Result<bool, regex::Error> {
    operator.map_or(Ok(true), |operator| operator.matches(value))
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct ContinentFilterInput {
    pub code: Option<StringQueryOperatorInput>,
}

impl ContinentFilterInput {
    pub fn matches(&self, continent: &crate::data::Continent) -> Result<bool, regex::Error> {
        matches_optional(self.code.as_ref(), Some(continent.code.as_str()))
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct CountryFilterInput {
    pub code: Option<StringQueryOperatorInput>,
    pub currency: Option<StringQueryOperatorInput>,
    pub continent: Option<StringQueryOperatorInput>,
}

impl CountryFilterInput {
    pub fn matches(&self, country: &crate::data::Country) -> Result<bool, regex::Error> {
        Ok(matches_optional(self.code.as_ref(), Some(country.code.as_str()))?
            && matches_optional(self.currency.as_ref(), country.currency.as_deref())?
            && matches_optional(self.continent.as_ref(), Some(country.continent_code.as_str()))?)
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct LanguageFilterInput {
    pub code: Option<StringQueryOperatorInput>,
}

impl LanguageFilterInput {
    pub fn matches(&self, language: &crate::data::Language) -> Result<bool, regex::Error> {
        matches_optional(self.code.as_ref(), Some(language.code.as_str()))
    }
}
