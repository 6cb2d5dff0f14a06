//! Request and response types for the Pinnacle REST API and XML line feed
//!
//! # Design Principles
//! 1. Enum wire names match the API exactly (`DECIMAL`, `TOTAL_POINTS`, ...)
//! 2. Query parameters keep the API's own casing (`sportid` on fixtures, `sportId` on line)
//! 3. Feed values are kept as verbatim strings; nothing is reinterpreted
//! 4. Team/side/handicap routing lives in one table: `BetType::selection_rule`
//!
//! # Sources
//! - https://pinnacleapi.github.io/linesapi
//! - https://pinnacleapi.github.io/betsapi

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// Query parameters as sent on the wire, in insertion order
pub type QueryParams = Vec<(&'static str, String)>;

// ============================================================================
// Enumerations
// ============================================================================

/// Odds presentation format
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum OddsFormat {
    #[default]
    Decimal,
    American,
}

impl OddsFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OddsFormat::Decimal => "DECIMAL",
            OddsFormat::American => "AMERICAN",
        }
    }
}

impl fmt::Display for OddsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OddsFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DECIMAL" => Ok(OddsFormat::Decimal),
            "AMERICAN" => Ok(OddsFormat::American),
            _ => Err(format!("unknown odds format: {} (expected DECIMAL or AMERICAN)", s)),
        }
    }
}

/// Which request fields carry the selection for a given bet type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRule {
    /// Selection is sent as `team`
    pub team: bool,
    /// Selection is sent as `side`
    pub side: bool,
    /// A `handicap` is part of the line
    pub handicap: bool,
}

/// Bet type
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BetType {
    Moneyline,
    Spread,
    TotalPoints,
    /// The live endpoint expects both a team (Team1/Team2) and a side
    /// (OVER/UNDER). A single selection is sent in both fields, so a
    /// request built from one value will not name a valid pair.
    TeamTotalPoints,
}

impl BetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BetType::Moneyline => "MONEYLINE",
            BetType::Spread => "SPREAD",
            BetType::TotalPoints => "TOTAL_POINTS",
            BetType::TeamTotalPoints => "TEAM_TOTAL_POINTS",
        }
    }

    /// Selection routing table
    ///
    /// | bet type          | team | side | handicap |
    /// |-------------------|------|------|----------|
    /// | MONEYLINE         |  x   |      |          |
    /// | SPREAD            |  x   |      |    x     |
    /// | TOTAL_POINTS      |      |  x   |    x     |
    /// | TEAM_TOTAL_POINTS |  x   |  x   |    x     |
    pub const fn selection_rule(&self) -> SelectionRule {
        match self {
            BetType::Moneyline => SelectionRule { team: true, side: false, handicap: false },
            BetType::Spread => SelectionRule { team: true, side: false, handicap: true },
            BetType::TotalPoints => SelectionRule { team: false, side: true, handicap: true },
            BetType::TeamTotalPoints => SelectionRule { team: true, side: true, handicap: true },
        }
    }
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "MONEYLINE" => Ok(BetType::Moneyline),
            "SPREAD" => Ok(BetType::Spread),
            "TOTAL_POINTS" => Ok(BetType::TotalPoints),
            "TEAM_TOTAL_POINTS" => Ok(BetType::TeamTotalPoints),
            _ => Err(format!("unknown bet type: {}", s)),
        }
    }
}

/// Whether the stake is the amount to risk or the amount to win
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum WinRiskStake {
    Win,
    #[default]
    Risk,
}

// ============================================================================
// Query builders
// ============================================================================

/// League filter: a single id or a list, sent as one comma-joined value
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LeagueIds(Vec<String>);

impl LeagueIds {
    /// Comma-joined representation used for the `leagueIds` parameter
    pub fn joined(&self) -> String {
        self.0.join(",")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for LeagueIds {
    fn from(id: &str) -> Self {
        LeagueIds(vec![id.to_string()])
    }
}

impl From<String> for LeagueIds {
    fn from(id: String) -> Self {
        LeagueIds(vec![id])
    }
}

impl From<u32> for LeagueIds {
    fn from(id: u32) -> Self {
        LeagueIds(vec![id.to_string()])
    }
}

impl<T: ToString> From<Vec<T>> for LeagueIds {
    fn from(ids: Vec<T>) -> Self {
        LeagueIds(ids.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString> From<&[T]> for LeagueIds {
    fn from(ids: &[T]) -> Self {
        LeagueIds(ids.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString, const N: usize> From<[T; N]> for LeagueIds {
    fn from(ids: [T; N]) -> Self {
        LeagueIds(ids.iter().map(ToString::to_string).collect())
    }
}

/// Options shared by `fixtures`, `settled_fixtures` and `odds`
#[derive(Clone, Debug, Default)]
pub struct FixtureQuery {
    pub league_ids: Option<LeagueIds>,
    /// Cursor returned as `last` by a previous call
    pub since: Option<i64>,
    /// Overrides the client's default odds format
    pub odds_format: Option<OddsFormat>,
}

impl FixtureQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn league_ids(mut self, ids: impl Into<LeagueIds>) -> Self {
        self.league_ids = Some(ids.into());
        self
    }

    pub fn since(mut self, since: i64) -> Self {
        self.since = Some(since);
        self
    }

    pub fn odds_format(mut self, format: OddsFormat) -> Self {
        self.odds_format = Some(format);
        self
    }

    /// Build the query string parameters
    pub fn to_params(&self, sport_id: u32, default_format: OddsFormat) -> QueryParams {
        let mut params: QueryParams = vec![("sportid", sport_id.to_string())];

        if let Some(ids) = self.league_ids.as_ref().filter(|ids| !ids.is_empty()) {
            params.push(("leagueIds", ids.joined()));
        }
        if let Some(since) = self.since {
            params.push(("since", since.to_string()));
        }
        params.push(("oddsFormat", self.odds_format.unwrap_or(default_format).to_string()));

        params
    }
}

/// Parameters for GET /v1/line
#[derive(Clone, Debug)]
pub struct LineRequest {
    pub sport_id: u32,
    pub league_id: u32,
    pub event_id: i64,
    pub period_number: i32,
    pub bet_type: BetType,
    /// Team (`Team1`, `Team2`, `Draw`) or side (`OVER`, `UNDER`), routed by bet type
    pub selection: String,
    /// Required for SPREAD, TOTAL_POINTS and TEAM_TOTAL_POINTS
    pub handicap: Option<f64>,
    pub odds_format: Option<OddsFormat>,
}

impl LineRequest {
    /// Build the query string parameters
    ///
    /// Fails without touching the network if the bet type needs a handicap
    /// and none was given.
    pub fn to_params(&self, default_format: OddsFormat) -> Result<QueryParams, ApiError> {
        let rule = self.bet_type.selection_rule();

        let mut params: QueryParams = vec![
            ("sportId", self.sport_id.to_string()),
            ("leagueId", self.league_id.to_string()),
            ("eventId", self.event_id.to_string()),
            ("periodNumber", self.period_number.to_string()),
            ("betType", self.bet_type.to_string()),
            ("oddsFormat", self.odds_format.unwrap_or(default_format).to_string()),
        ];

        if rule.team {
            params.push(("team", self.selection.clone()));
        }
        if rule.side {
            params.push(("side", self.selection.clone()));
        }
        if rule.handicap {
            let handicap = self.handicap.ok_or_else(|| {
                ApiError::InvalidRequest(format!("{} line requires a handicap", self.bet_type))
            })?;
            params.push(("handicap", handicap.to_string()));
        }

        Ok(params)
    }
}

// ============================================================================
// Bet placement
// ============================================================================

/// Identifying fields of a bet to place
#[derive(Clone, Debug)]
pub struct BetSlip {
    /// Client-generated idempotency key
    pub request_id: String,
    pub sport_id: u32,
    pub event_id: i64,
    pub period_number: i32,
    pub line_id: i64,
    pub bet_type: BetType,
    /// Team or side, routed by bet type
    pub selection: String,
    pub wager: f64,
}

/// Optional settings for bet placement
#[derive(Clone, Debug, Default)]
pub struct PlaceBetOptions {
    pub win_risk_stake: Option<WinRiskStake>,
    pub odds_format: Option<OddsFormat>,
    pub customer_reference: Option<String>,
}

/// JSON body of POST /v1/bets/place
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBetRequest {
    pub unique_request_id: String,
    pub accept_better_line: bool,
    pub odds_format: OddsFormat,
    pub stake: f64,
    pub win_risk_stake: WinRiskStake,
    pub sport_id: u32,
    pub event_id: i64,
    pub period_number: i32,
    pub bet_type: BetType,
    pub line_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_reference: Option<String>,
}

impl PlaceBetRequest {
    /// Assemble the request body
    ///
    /// Better lines are always accepted. Team/side follow the same table as `line`.
    pub fn new(slip: &BetSlip, options: &PlaceBetOptions, default_format: OddsFormat) -> Self {
        let rule = slip.bet_type.selection_rule();

        Self {
            unique_request_id: slip.request_id.clone(),
            accept_better_line: true,
            odds_format: options.odds_format.unwrap_or(default_format),
            stake: slip.wager,
            win_risk_stake: options.win_risk_stake.unwrap_or_default(),
            sport_id: slip.sport_id,
            event_id: slip.event_id,
            period_number: slip.period_number,
            bet_type: slip.bet_type,
            line_id: slip.line_id,
            team: rule.team.then(|| slip.selection.clone()),
            side: rule.side.then(|| slip.selection.clone()),
            customer_reference: options.customer_reference.clone(),
        }
    }
}

// ============================================================================
// XML line feed records
// ============================================================================

/// One event from the line feed
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedEvent {
    pub game_number: String,
    pub sports_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub league: Option<String>,
    /// Event start (GMT), verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_datetime: Option<String>,
    pub periods: Vec<FeedPeriod>,
    pub participants: Vec<FeedParticipant>,
}

/// A period of an event (full game, 1st half, ...)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedPeriod {
    pub number: String,
    pub description: String,
    /// Cutoff time (GMT), verbatim
    pub datetime: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spread: Option<FeedSpread>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moneyline: Option<FeedMoneyline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<FeedTotal>,
}

impl FeedPeriod {
    /// Parse the cutoff as UTC
    ///
    /// The feed uses `YYYY-MM-DD HH:MM`, occasionally with seconds.
    pub fn cutoff_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.datetime.trim();
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// Spread quote of a period
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedSpread {
    pub visiting: String,
    pub adjust_visiting: String,
    pub home: String,
    pub adjust_home: String,
}

/// Moneyline quote of a period
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedMoneyline {
    pub visiting: String,
    pub home: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draw: Option<String>,
}

/// Total points quote of a period
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedTotal {
    pub points: String,
    pub over_adjust: String,
    pub under_adjust: String,
}

/// A participant of an event
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedParticipant {
    pub contestant_number: String,
    pub name: String,
    pub rot_number: String,
    /// `Visiting`, `Home` or `Draw`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visiting_home_draw: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a QueryParams, key: &str) -> Option<&'a str> {
        params.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    fn line(bet_type: BetType, handicap: Option<f64>) -> LineRequest {
        LineRequest {
            sport_id: 29,
            league_id: 1980,
            event_id: 758_023_991,
            period_number: 0,
            bet_type,
            selection: "Team1".to_string(),
            handicap,
            odds_format: None,
        }
    }

    #[test]
    fn test_league_ids_scalar_and_list_match() {
        let scalar = FixtureQuery::new().league_ids("1").to_params(29, OddsFormat::Decimal);
        let list = FixtureQuery::new().league_ids(vec!["1"]).to_params(29, OddsFormat::Decimal);
        assert_eq!(scalar, list);
        assert_eq!(param(&scalar, "leagueIds"), Some("1"));

        let numeric = FixtureQuery::new().league_ids([1980u32, 2036]).to_params(29, OddsFormat::Decimal);
        assert_eq!(param(&numeric, "leagueIds"), Some("1980,2036"));
    }

    #[test]
    fn test_fixture_query_minimal() {
        let params = FixtureQuery::new().to_params(29, OddsFormat::Decimal);
        assert_eq!(
            params,
            vec![("sportid", "29".to_string()), ("oddsFormat", "DECIMAL".to_string())]
        );
    }

    #[test]
    fn test_fixture_query_empty_league_list_is_omitted() {
        let params = FixtureQuery::new()
            .league_ids(Vec::<u32>::new())
            .to_params(29, OddsFormat::Decimal);
        assert_eq!(param(&params, "leagueIds"), None);
    }

    #[test]
    fn test_fixture_query_since_passthrough() {
        let params = FixtureQuery::new().since(1_394_048_413_000).to_params(29, OddsFormat::Decimal);
        assert_eq!(param(&params, "since"), Some("1394048413000"));
    }

    #[test]
    fn test_odds_format_precedence() {
        let default_only = FixtureQuery::new().to_params(29, OddsFormat::American);
        assert_eq!(param(&default_only, "oddsFormat"), Some("AMERICAN"));

        let overridden = FixtureQuery::new()
            .odds_format(OddsFormat::Decimal)
            .to_params(29, OddsFormat::American);
        assert_eq!(param(&overridden, "oddsFormat"), Some("DECIMAL"));

        assert_eq!(OddsFormat::default(), OddsFormat::Decimal);
    }

    #[test]
    fn test_line_spread_routes_to_team_with_handicap() {
        let params = line(BetType::Spread, Some(-1.5)).to_params(OddsFormat::Decimal).unwrap();
        assert_eq!(param(&params, "team"), Some("Team1"));
        assert_eq!(param(&params, "side"), None);
        assert_eq!(param(&params, "handicap"), Some("-1.5"));
        assert_eq!(param(&params, "betType"), Some("SPREAD"));
    }

    #[test]
    fn test_line_total_points_routes_to_side_with_handicap() {
        let mut req = line(BetType::TotalPoints, Some(5.5));
        req.selection = "OVER".to_string();
        let params = req.to_params(OddsFormat::Decimal).unwrap();
        assert_eq!(param(&params, "side"), Some("OVER"));
        assert_eq!(param(&params, "team"), None);
        assert_eq!(param(&params, "handicap"), Some("5.5"));
    }

    #[test]
    fn test_line_moneyline_has_no_handicap() {
        let params = line(BetType::Moneyline, Some(2.0)).to_params(OddsFormat::Decimal).unwrap();
        assert_eq!(param(&params, "team"), Some("Team1"));
        assert_eq!(param(&params, "handicap"), None);
    }

    #[test]
    fn test_line_team_total_sets_team_and_side() {
        let params = line(BetType::TeamTotalPoints, Some(2.5)).to_params(OddsFormat::Decimal).unwrap();
        assert_eq!(param(&params, "team"), Some("Team1"));
        assert_eq!(param(&params, "side"), Some("Team1"));
        assert_eq!(param(&params, "handicap"), Some("2.5"));
    }

    #[test]
    fn test_line_missing_handicap_rejected() {
        let err = line(BetType::Spread, None).to_params(OddsFormat::Decimal).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[test]
    fn test_place_bet_body_defaults() {
        let slip = BetSlip {
            request_id: "a3f1c2d4".to_string(),
            sport_id: 29,
            event_id: 758_023_991,
            period_number: 0,
            line_id: 37_561_291,
            bet_type: BetType::TotalPoints,
            selection: "UNDER".to_string(),
            wager: 25.0,
        };
        let body = PlaceBetRequest::new(&slip, &PlaceBetOptions::default(), OddsFormat::American);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["uniqueRequestId"], "a3f1c2d4");
        assert_eq!(json["acceptBetterLine"], true);
        assert_eq!(json["oddsFormat"], "AMERICAN");
        assert_eq!(json["stake"], 25.0);
        assert_eq!(json["winRiskStake"], "RISK");
        assert_eq!(json["betType"], "TOTAL_POINTS");
        assert_eq!(json["side"], "UNDER");
        assert!(json.get("team").is_none());
        assert!(json.get("customerReference").is_none());
    }

    #[test]
    fn test_place_bet_options_override() {
        let slip = BetSlip {
            request_id: "r1".to_string(),
            sport_id: 29,
            event_id: 1,
            period_number: 0,
            line_id: 2,
            bet_type: BetType::Moneyline,
            selection: "Team2".to_string(),
            wager: 10.0,
        };
        let options = PlaceBetOptions {
            win_risk_stake: Some(WinRiskStake::Win),
            odds_format: Some(OddsFormat::Decimal),
            customer_reference: Some("ref-7".to_string()),
        };
        let body = PlaceBetRequest::new(&slip, &options, OddsFormat::American);

        assert_eq!(body.win_risk_stake, WinRiskStake::Win);
        assert_eq!(body.odds_format, OddsFormat::Decimal);
        assert_eq!(body.team.as_deref(), Some("Team2"));
        assert_eq!(body.side, None);
        assert_eq!(body.customer_reference.as_deref(), Some("ref-7"));
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("american".parse::<OddsFormat>().unwrap(), OddsFormat::American);
        assert!("fractional".parse::<OddsFormat>().is_err());
        assert_eq!("team-total-points".parse::<BetType>().unwrap(), BetType::TeamTotalPoints);
        assert_eq!(serde_json::to_value(BetType::TeamTotalPoints).unwrap(), "TEAM_TOTAL_POINTS");
    }

    #[test]
    fn test_period_cutoff_utc() {
        let period = FeedPeriod {
            number: "0".to_string(),
            description: "Game".to_string(),
            datetime: "2024-03-09 19:05".to_string(),
            spread: None,
            moneyline: None,
            total: None,
        };
        let cutoff = period.cutoff_utc().unwrap();
        assert_eq!(cutoff.to_rfc3339(), "2024-03-09T19:05:00+00:00");

        let bad = FeedPeriod { datetime: "soon".to_string(), ..period };
        assert!(bad.cutoff_utc().is_none());
    }
}
