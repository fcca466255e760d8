//! Selection key identifying the vehicle, city, finish and garage of a request

use panelcost_types::{EstimateError, GarageTier};
use serde::{Deserialize, Serialize};

use super::canonical::{canonicalize, canonicalize_year};
use super::rate_table::RowKey;

/// Key fields of a request. Deserialized keys pass through
/// [`SelectionKey::new`] and are always canonical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SelectionKeyFields")]
pub struct SelectionKey {
    pub maker: String,
    pub model: String,
    pub year: String,
    pub city: String,
    pub paint_finish: String,
    pub garage_tier: GarageTier,
}

#[derive(Deserialize)]
struct SelectionKeyFields {
    maker: String,
    model: String,
    year: String,
    city: String,
    paint_finish: String,
    #[serde(default)]
    garage_tier: GarageTier,
}

impl From<SelectionKeyFields> for SelectionKey {
    fn from(fields: SelectionKeyFields) -> Self {
        Self::new(
            &fields.maker,
            &fields.model,
            &fields.year,
            &fields.city,
            &fields.paint_finish,
            fields.garage_tier,
        )
    }
}

impl SelectionKey {
    /// Build a key from user input; every text field is canonicalized
    pub fn new(
        maker: &str,
        model: &str,
        year: &str,
        city: &str,
        paint_finish: &str,
        garage_tier: GarageTier,
    ) -> Self {
        Self {
            maker: canonicalize(maker),
            model: canonicalize(model),
            year: canonicalize_year(year),
            city: canonicalize(city),
            paint_finish: canonicalize(paint_finish),
            garage_tier,
        }
    }

    /// Canonical copy; a no-op for keys built with [`SelectionKey::new`]
    pub fn canonical(&self) -> Self {
        Self::new(
            &self.maker,
            &self.model,
            &self.year,
            &self.city,
            &self.paint_finish,
            self.garage_tier,
        )
    }

    /// Reject keys with an unset field
    pub fn validate(&self) -> Result<(), EstimateError> {
        let fields = [
            ("maker", &self.maker),
            ("model", &self.model),
            ("year", &self.year),
            ("city", &self.city),
            ("paint_finish", &self.paint_finish),
        ];
        for (name, value) in fields {
            if value.is_empty() {
                return Err(EstimateError::MissingField(name));
            }
        }
        Ok(())
    }

    pub fn painting_key(&self) -> RowKey {
        RowKey {
            maker: self.maker.clone(),
            model: self.model.clone(),
            year: self.year.clone(),
            city: self.city.clone(),
            paint_finish: Some(self.paint_finish.clone()),
        }
    }

    pub fn labour_key(&self) -> RowKey {
        RowKey {
            paint_finish: None,
            ..self.painting_key()
        }
    }
}

impl std::fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} / {} / {} / garage {}",
            self.maker, self.model, self.year, self.city, self.paint_finish, self.garage_tier
        )
    }
}
