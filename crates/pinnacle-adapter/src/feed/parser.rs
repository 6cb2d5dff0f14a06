//! Line feed parser
//!
//! Schema (only the parts we read):
//! ```text
//! <pinnacle_line_feed>
//!   <events>
//!     <event>
//!       <event_datetimeGMT/> <gamenumber/> <sporttype/> <league/>
//!       <participants>
//!         <participant> <participant_name/> <contestantnum/> <rotnum/> <visiting_home_draw/> </participant>
//!       </participants>
//!       <periods>
//!         <period>
//!           <period_number/> <period_description/> <periodcutoff_datetimeGMT/>
//!           <spread> <spread_visiting/> <spread_adjust_visiting/> <spread_home/> <spread_adjust_home/> </spread>
//!           <moneyline> <moneyline_visiting/> <moneyline_home/> <moneyline_draw/> </moneyline>
//!           <total> <total_points/> <over_adjust/> <under_adjust/> </total>
//!         </period>
//!       </periods>
//!     </event>
//!   </events>
//! </pinnacle_line_feed>
//! ```
//!
//! Required elements that are absent produce `FeedError::MissingElement`.
//! `spread`, `moneyline` and `total` are optional, but once present their
//! children are required. Missing `periods` / `participants` containers
//! yield empty lists.

use roxmltree::{Document, Node};

use crate::error::FeedError;
use crate::types::{FeedEvent, FeedMoneyline, FeedParticipant, FeedPeriod, FeedSpread, FeedTotal};

/// Parse a feed document into events, in document order
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEvent>, FeedError> {
    let doc = Document::parse(xml)?;

    doc.descendants()
        .filter(|n| {
            n.has_tag_name("event") && n.parent_element().is_some_and(|p| p.has_tag_name("events"))
        })
        .map(parse_event)
        .collect()
}

fn parse_event(node: Node<'_, '_>) -> Result<FeedEvent, FeedError> {
    let periods = children_of(node, "periods", "period")
        .into_iter()
        .map(parse_period)
        .collect::<Result<Vec<_>, _>>()?;

    let participants = children_of(node, "participants", "participant")
        .into_iter()
        .map(parse_participant)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeedEvent {
        game_number: required_text(node, "event", "gamenumber")?,
        sports_type: required_text(node, "event", "sporttype")?,
        league: optional_text(node, "league"),
        event_datetime: optional_text(node, "event_datetimeGMT"),
        periods,
        participants,
    })
}

fn parse_period(node: Node<'_, '_>) -> Result<FeedPeriod, FeedError> {
    let spread = child(node, "spread")
        .map(|s| {
            Ok::<_, FeedError>(FeedSpread {
                visiting: required_text(s, "spread", "spread_visiting")?,
                adjust_visiting: required_text(s, "spread", "spread_adjust_visiting")?,
                home: required_text(s, "spread", "spread_home")?,
                adjust_home: required_text(s, "spread", "spread_adjust_home")?,
            })
        })
        .transpose()?;

    let moneyline = child(node, "moneyline")
        .map(|m| {
            Ok::<_, FeedError>(FeedMoneyline {
                visiting: required_text(m, "moneyline", "moneyline_visiting")?,
                home: required_text(m, "moneyline", "moneyline_home")?,
                draw: optional_text(m, "moneyline_draw"),
            })
        })
        .transpose()?;

    let total = child(node, "total")
        .map(|t| {
            Ok::<_, FeedError>(FeedTotal {
                points: required_text(t, "total", "total_points")?,
                over_adjust: required_text(t, "total", "over_adjust")?,
                under_adjust: required_text(t, "total", "under_adjust")?,
            })
        })
        .transpose()?;

    Ok(FeedPeriod {
        number: required_text(node, "period", "period_number")?,
        description: required_text(node, "period", "period_description")?,
        datetime: required_text(node, "period", "periodcutoff_datetimeGMT")?,
        spread,
        moneyline,
        total,
    })
}

fn parse_participant(node: Node<'_, '_>) -> Result<FeedParticipant, FeedError> {
    Ok(FeedParticipant {
        contestant_number: required_text(node, "participant", "contestantnum")?,
        name: required_text(node, "participant", "participant_name")?,
        rot_number: required_text(node, "participant", "rotnum")?,
        visiting_home_draw: optional_text(node, "visiting_home_draw"),
    })
}

/// First direct child element with the given tag name
fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.is_element() && n.has_tag_name(name))
}

/// `<container><item/>...</container>` items; empty if the container is absent
fn children_of<'a, 'input>(
    node: Node<'a, 'input>,
    container: &str,
    item: &str,
) -> Vec<Node<'a, 'input>> {
    child(node, container)
        .map(|c| c.children().filter(|n| n.is_element() && n.has_tag_name(item)).collect())
        .unwrap_or_default()
}

/// All text below the element, joined in document order and kept verbatim
fn text_of(node: Node<'_, '_>) -> String {
    node.descendants().filter(|n| n.is_text()).filter_map(|n| n.text()).collect()
}

fn required_text(
    node: Node<'_, '_>,
    parent: &'static str,
    element: &'static str,
) -> Result<String, FeedError> {
    child(node, element).map(text_of).ok_or(FeedError::MissingElement { parent, element })
}

fn optional_text(node: Node<'_, '_>, element: &str) -> Option<String> {
    child(node, element).map(text_of)
}
