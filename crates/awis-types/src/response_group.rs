//! URL-info response group definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A category of information the service can include in a URL-info response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResponseGroup {
    /// Sites related to the queried one.
    RelatedLinks,
    /// Directory categories the site is listed under.
    Categories,
    /// Global traffic rank.
    Rank,
    /// Traffic rank per country.
    RankByCountry,
    /// Usage statistics (reach, page views).
    UsageStats,
    /// Whether the site carries adult content.
    AdultContent,
    /// Median load time.
    Speed,
    /// Content language and encoding.
    Language,
    /// Other domains owned by the same owner.
    OwnedDomains,
    /// Number of sites linking in.
    LinksInCount,
    /// Title, description and online-since date.
    SiteData,
}

impl ResponseGroup {
    /// Returns the group name as sent to the service.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RelatedLinks => "RelatedLinks",
            Self::Categories => "Categories",
            Self::Rank => "Rank",
            Self::RankByCountry => "RankByCountry",
            Self::UsageStats => "UsageStats",
            Self::AdultContent => "AdultContent",
            Self::Speed => "Speed",
            Self::Language => "Language",
            Self::OwnedDomains => "OwnedDomains",
            Self::LinksInCount => "LinksInCount",
            Self::SiteData => "SiteData",
        }
    }

    /// Returns all valid response groups.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::RelatedLinks,
            Self::Categories,
            Self::Rank,
            Self::RankByCountry,
            Self::UsageStats,
            Self::AdultContent,
            Self::Speed,
            Self::Language,
            Self::OwnedDomains,
            Self::LinksInCount,
            Self::SiteData,
        ]
    }

    /// Parses a list of group names, rejecting the whole list if any name is unknown.
    ///
    /// Duplicates are dropped, keeping the first occurrence. An empty list is
    /// a valid (empty) set.
    ///
    /// # Errors
    ///
    /// Returns an error if the list contains an unknown name.
    pub fn parse_set<I, S>(names: I) -> Result<Vec<Self>, ResponseGroupParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut groups = Vec::new();
        for name in names {
            let group = name.as_ref().trim().parse::<Self>()?;
            if !groups.contains(&group) {
                groups.push(group);
            }
        }
        Ok(groups)
    }

    /// Joins groups with commas, the form the `ResponseGroup` parameter expects.
    #[must_use]
    pub fn join(groups: &[Self]) -> String {
        groups
            .iter()
            .map(Self::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl std::fmt::Display for ResponseGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ResponseGroup {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for ResponseGroup {
    type Err = ResponseGroupParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|group| group.as_str() == s)
            .copied()
            .ok_or_else(|| ResponseGroupParseError::Unknown(s.to_string()))
    }
}

/// Error returned when validating response group names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseGroupParseError {
    /// The name is not one of the valid response groups.
    #[error("invalid response group '{0}'")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_group() {
        for group in ResponseGroup::all() {
            assert_eq!(group.as_str().parse::<ResponseGroup>().unwrap(), *group);
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("rank".parse::<ResponseGroup>().is_err());
    }

    #[test]
    fn test_parse_set_subset_accepted() {
        let groups = ResponseGroup::parse_set(["Rank", "UsageStats", "SiteData"]).unwrap();
        assert_eq!(
            groups,
            vec![
                ResponseGroup::Rank,
                ResponseGroup::UsageStats,
                ResponseGroup::SiteData
            ]
        );
    }

    #[test]
    fn test_parse_set_full_set_accepted() {
        let names: Vec<_> = ResponseGroup::all().iter().map(|g| g.as_str()).collect();
        let groups = ResponseGroup::parse_set(names).unwrap();
        assert_eq!(groups.len(), 11);
    }

    #[test]
    fn test_parse_set_unknown_rejected() {
        let result = ResponseGroup::parse_set(["Rank", "TrafficData"]);
        assert_eq!(
            result,
            Err(ResponseGroupParseError::Unknown("TrafficData".to_string()))
        );
    }

    #[test]
    fn test_parse_set_empty_accepted() {
        let groups = ResponseGroup::parse_set(Vec::<String>::new()).unwrap();
        assert!(groups.is_empty());
        assert_eq!(ResponseGroup::join(&groups), "");
    }

    #[test]
    fn test_parse_set_dedups() {
        let groups = ResponseGroup::parse_set(["Rank", " Speed", "Rank"]).unwrap();
        assert_eq!(groups, vec![ResponseGroup::Rank, ResponseGroup::Speed]);
    }

    #[test]
    fn test_join() {
        let joined = ResponseGroup::join(&[ResponseGroup::Rank, ResponseGroup::LinksInCount]);
        assert_eq!(joined, "Rank,LinksInCount");
    }
}
