//! Station result cards.
//!
//! Turns the result set into display text, one card per station, in the
//! order the service returned them. Nothing is sorted, merged or filtered
//! here.

use crate::models::{PortCount, StationResult};

/// Text of one rendered station card
#[derive(Debug, Clone, PartialEq)]
pub struct StationCard {
    pub name: String,
    pub street_address: String,
    pub locality: String,
    pub distance: String,
    pub ports: String,
}

impl StationCard {
    pub fn from_result(result: &StationResult) -> Self {
        let station = &result.station;
        let (meters, kilometers) = format_distance(result.distance_meters);

        Self {
            name: station.name.clone(),
            street_address: station.street_address.clone(),
            locality: format!("{}, {}", station.city, station.state),
            distance: format!("{} Meters Or {} Kilometers", meters, kilometers),
            ports: format!(
                "DC Fast Charger: {} | Level 2 Charger: {} | Level 1 Charger: {}",
                format_ports(station.ev_dc_fast.as_ref()),
                format_ports(station.ev_level2.as_ref()),
                format_ports(station.ev_level1.as_ref()),
            ),
        }
    }

    /// Body lines below the title
    pub fn detail_lines(&self) -> [&str; 4] {
        [
            self.street_address.as_str(),
            self.locality.as_str(),
            self.distance.as_str(),
            self.ports.as_str(),
        ]
    }

    /// Card as plain text lines, title first
    pub fn lines(&self) -> Vec<String> {
        std::iter::once(self.name.as_str())
            .chain(self.detail_lines())
            .map(str::to_string)
            .collect()
    }
}

/// One card per result, same order
pub fn render_cards(results: &[StationResult]) -> Vec<StationCard> {
    results.iter().map(StationCard::from_result).collect()
}

/// Port count text; absent or empty counts read as zero
pub fn format_ports(count: Option<&PortCount>) -> String {
    match count {
        Some(c) if !c.is_blank() => format!("{} ports", c),
        _ => "0 ports".to_string(),
    }
}

/// Distance as (meters, kilometers), both with two decimals
pub fn format_distance(distance_meters: f64) -> (String, String) {
    (
        to_fixed(distance_meters, 2),
        to_fixed(distance_meters / 1000.0, 2),
    )
}

/// Enough fractional digits to hold the exact expansion of any `f64`
const EXACT_DIGITS: usize = 1100;

/// Fixed-point text where an exact half rounds away from zero.
///
/// `{:.N}` rounds exact ties to even; a distance of 125 m must read as
/// "0.13" km, not "0.12". Only exact ties in the binary value count, so
/// 1.005 (stored just below) still reads "1.00".
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() || digits >= EXACT_DIGITS {
        return format!("{:.*}", digits, value);
    }

    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let Some((int_part, frac)) = exact.split_once('.') else {
        return format!("{:.*}", digits, value);
    };

    let rest = &frac[digits..];
    let is_tie = rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return format!("{:.*}", digits, value);
    }

    let mut kept: Vec<char> = int_part.chars().chain(frac[..digits].chars()).collect();
    let mut carry = true;
    for d in kept.iter_mut().rev() {
        if *d == '9' {
            *d = '0';
        } else {
            *d = char::from(*d as u8 + 1);
            carry = false;
            break;
        }
    }
    if carry {
        kept.insert(0, '1');
    }

    let split = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.extend(&kept[..split]);
    if digits > 0 {
        out.push('.');
        out.extend(&kept[split..]);
    }
    out
}

/// Plain-text listing used by the CLI
pub fn render_text(results: &[StationResult]) -> String {
    let mut out = String::new();
    for (index, card) in render_cards(results).iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        for line in card.lines() {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}
