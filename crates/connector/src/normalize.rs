//! Element -> Instrument / Candle normalization
//!
//! Reads the profile's field names out of a raw element. Text fields
//! default to empty. Numeric fields stay `None` when absent or empty and
//! are an error when present but unparseable; a wrong tick or step size is
//! worse than none. Candle fields are all required.

use log::warn;
use meridian_core::{Candle, Instrument, InstrumentKind, exact_decimal, fields};
use meridian_ports::Element;

use crate::config::ExchangeProfile;
use crate::error::NormalizeError;

/// Normalizes raw elements for one exchange
pub struct Normalizer<'a> {
    profile: &'a ExchangeProfile,
}

impl<'a> Normalizer<'a> {
    pub fn new(profile: &'a ExchangeProfile) -> Self {
        Self { profile }
    }

    /// Build one instrument from one element
    pub fn normalize(&self, element: &Element) -> Result<Instrument, NormalizeError> {
        let names = &self.profile.fields;

        let id = text(element, &names.instrument);
        if id.is_empty() {
            warn!(
                "{}: element without {} field, keeping it under an empty id",
                self.profile.id, names.instrument
            );
        }
        let number = |field: &str| parse_number(element, field, &id);
        let exact = |field: &str| element.get(field).and_then(|raw| exact_decimal(raw));

        let base = text(element, &names.base);
        let quote = text(element, &names.quote);
        let symbol = Instrument::unified_symbol(&id, &base, &quote);

        Ok(Instrument {
            tick_size: number(&names.price_increment)?,
            step_size: number(&names.quantity_increment)?,
            tick_size_exact: exact(&names.price_increment),
            step_size_exact: exact(&names.quantity_increment),
            min_size: number(&names.quantity_min)?,
            min_notional: number(&names.quote_quantity_min)?,
            contract_size: number(&names.contract_size)?,
            contract_multiplier: number(&names.contract_multiplier)?,
            kind: self.kind(element),
            active: self.active(element),
            settle: text(element, &names.settle),
            underlying: text(element, &names.underlying),
            info: element.clone(),
            id,
            symbol,
            base,
            quote,
        })
    }

    /// Normalize every element, stopping at the first malformed one
    pub fn normalize_all(&self, elements: &[Element]) -> Result<Vec<Instrument>, NormalizeError> {
        elements.iter().map(|e| self.normalize(e)).collect()
    }

    /// Build one candle of `instrument` from one element
    pub fn normalize_candle(
        &self,
        instrument: &str,
        element: &Element,
    ) -> Result<Candle, NormalizeError> {
        let price = |field: &str| {
            parse_number(element, field, instrument)?.ok_or_else(|| NormalizeError::MissingField {
                instrument: instrument.to_string(),
                field: field.to_string(),
            })
        };

        Ok(Candle {
            timestamp: parse_timestamp(element, instrument)?,
            open: price(fields::OPEN_PRICE)?,
            high: price(fields::HIGH_PRICE)?,
            low: price(fields::LOW_PRICE)?,
            close: price(fields::CLOSE_PRICE)?,
            volume: price(fields::VOLUME)?,
        })
    }

    fn kind(&self, element: &Element) -> InstrumentKind {
        element
            .get(&self.profile.fields.kind)
            .and_then(|value| value.parse().ok())
            .unwrap_or(self.profile.kind)
    }

    fn active(&self, element: &Element) -> Option<bool> {
        let expected = self.profile.active_status.as_deref()?;
        element
            .get(&self.profile.fields.status)
            .map(|status| status == expected)
    }
}

fn text(element: &Element, field: &str) -> String {
    element.get(field).cloned().unwrap_or_default()
}

fn parse_number(
    element: &Element,
    field: &str,
    instrument: &str,
) -> Result<Option<f64>, NormalizeError> {
    let Some(raw) = element.get(field) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(NormalizeError::MalformedNumber {
            instrument: instrument.to_string(),
            field: field.to_string(),
            value: raw.clone(),
        }),
    }
}

fn parse_timestamp(element: &Element, instrument: &str) -> Result<u64, NormalizeError> {
    let raw = element
        .get(fields::TIMESTAMP)
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| NormalizeError::MissingField {
            instrument: instrument.to_string(),
            field: fields::TIMESTAMP.to_string(),
        })?;

    raw.trim()
        .parse::<u64>()
        .map_err(|_| NormalizeError::MalformedNumber {
            instrument: instrument.to_string(),
            field: fields::TIMESTAMP.to_string(),
            value: raw.clone(),
        })
}
