//! Feature schema of the fraud model.
//!
//! The artifact was trained on 28 columns in the order below. Only the first
//! three come from the request; the one-hot category, state-bin and month
//! indicators are always sent as absent.

use derive_more::Deref;

use crate::PredictionRequest;

pub const FEATURE_COUNT: usize = 28;

/// Number of leading columns copied from a [`PredictionRequest`].
pub const REQUEST_FEATURES: usize = 3;

/// Value used for every indicator the request does not carry.
pub const ABSENT: f32 = 0.0;

pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "amt",
    "age",
    "distance_km",
    "category_food_dining",
    "category_gas_transport",
    "category_grocery_net",
    "category_grocery_pos",
    "category_health_fitness",
    "category_home",
    "category_kids_pets",
    "category_misc_net",
    "category_misc_pos",
    "category_personal_care",
    "category_shopping_net",
    "category_shopping_pos",
    "category_travel",
    "state_bin_Top 3",
    "Month_name_Aug",
    "Month_name_Dec",
    "Month_name_Feb",
    "Month_name_Jan",
    "Month_name_Jul",
    "Month_name_Jun",
    "Month_name_Mar",
    "Month_name_May",
    "Month_name_Nov",
    "Month_name_Oct",
    "Month_name_Sep",
];

/// A single model input row, ordered as [`FEATURE_NAMES`].
#[derive(Debug, Clone, PartialEq, Deref)]
pub struct FeatureVector([f32; FEATURE_COUNT]);

impl FeatureVector {
    /// Copies the request fields into the leading columns.
    ///
    /// The model takes `f32` input, so the `f64` request values are narrowed:
    /// precision past about 7 significant digits is lost and magnitudes beyond
    /// `f32::MAX` become infinite.
    pub fn from_request(request: &PredictionRequest) -> Self {
        let mut values = [ABSENT; FEATURE_COUNT];
        values[..REQUEST_FEATURES].copy_from_slice(&[
            request.amt as f32,
            request.age as f32,
            request.distance_km as f32,
        ]);
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn named(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}
