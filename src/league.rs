use serde::{Deserialize, Serialize};

use crate::config::ZoneConfig;
use crate::matches::TeamId;

/// Static description of one league: its identifier in the match corpus and the clubs
/// expected to take part.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct LeagueConfig {
    /// League identifier as carried by match records
    pub id: String,

    pub name: String,

    /// Registered teams. Empty means "whoever appears in the corpus".
    #[serde(default)]
    pub teams: Vec<TeamId>,

    /// Zone boundaries for this league, overriding the run configuration
    #[serde(default)]
    pub zones: Option<ZoneConfig>,
}

const SERIE_A_TEAMS: [&str; 20] = [
    "Atlético Mineiro",
    "Bahia",
    "Botafogo",
    "Bragantino",
    "Ceará",
    "Corinthians",
    "Cruzeiro",
    "Flamengo",
    "Fluminense",
    "Fortaleza",
    "Grêmio",
    "Internacional",
    "Juventude",
    "Mirassol",
    "Palmeiras",
    "Santos",
    "São Paulo",
    "Sport Recife",
    "Vasco da Gama",
    "Vitória",
];

const SERIE_B_TEAMS: [&str; 20] = [
    "Amazonas",
    "América Mineiro",
    "Athletic Club-MG",
    "Atlético Goianiense",
    "Athletico Paranaense",
    "Avaí",
    "Botafogo-SP",
    "Chapecoense",
    "CRB",
    "Criciúma",
    "Coritiba",
    "Cuiabá",
    "Ferroviária",
    "Goiás",
    "Novorizontino",
    "Operário Ferroviário",
    "Paysandu",
    "Remo",
    "Vila Nova",
    "Volta Redonda",
];

impl LeagueConfig {
    pub fn new(id: &str, name: &str, teams: &[&str]) -> Self {
        LeagueConfig {
            id: id.to_string(),
            name: name.to_string(),
            teams: teams.iter().map(|t| t.to_string()).collect(),
            zones: None,
        }
    }

    /// Brazilian top flight; the qualification zone is continental qualification.
    pub fn serie_a() -> Self {
        LeagueConfig::new("Brazilian Serie A", "Série A", &SERIE_A_TEAMS)
    }

    /// Brazilian second flight; the stricter qualification zone is promotion.
    pub fn serie_b() -> Self {
        LeagueConfig::new("Brazilian Serie B", "Série B", &SERIE_B_TEAMS)
    }

    pub fn with_zones(mut self, zones: ZoneConfig) -> Self {
        self.zones = Some(zones);
        self
    }

    /// Zone boundaries in effect for this league.
    pub fn zones_or(&self, fallback: ZoneConfig) -> ZoneConfig {
        self.zones.unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let a = LeagueConfig::serie_a();
        let b = LeagueConfig::serie_b();
        assert_eq!(a.teams.len(), 20);
        assert_eq!(b.teams.len(), 20);
        assert_eq!(a.id, "Brazilian Serie A");
        assert!(b.teams.contains(&"Chapecoense".to_string()));
    }

    #[test]
    fn test_zone_override() {
        let zones = ZoneConfig {
            qualification: 4,
            strict_qualification: 2,
            relegation: 9,
        };
        let league = LeagueConfig::new("L", "League", &["A", "B"]).with_zones(zones);
        assert_eq!(league.zones_or(ZoneConfig::default()), zones);
        assert_eq!(
            LeagueConfig::new("L", "League", &[]).zones_or(ZoneConfig::default()),
            ZoneConfig::default()
        );
    }

    #[test]
    fn test_from_json() {
        let league: LeagueConfig =
            serde_json::from_str(r#"{"id": "L", "name": "League", "teams": ["A", "B"]}"#).unwrap();
        assert_eq!(league.teams, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(league.zones, None);
    }
}
