use crate::models::Condition;

// ---------------------------------------------------------------------------
// Post-hoc adjustments (after the symptom chain)
// ---------------------------------------------------------------------------

/// Ages at or above this are treated alike.
pub const AGE_SATURATION_YEARS: f64 = 80.0;
/// Age likelihood at age 0.
pub const AGE_LIKELIHOOD_BASE: f64 = 0.3;
/// Age likelihood gained between age 0 and saturation.
pub const AGE_LIKELIHOOD_SPAN: f64 = 0.5;
/// Likelihood ratio applied for male patients.
pub const MALE_LIKELIHOOD_RATIO: f64 = 1.2;
/// Pneumonia posterior once pneumonia is confirmed.
pub const CONFIRMED_PNEUMONIA_POSTERIOR: f64 = 0.95;
/// P(Covid-19 | Pneumonia), used as a floor when pneumonia is confirmed.
pub const COVID_GIVEN_PNEUMONIA: f64 = 0.30;
/// Highest reportable probability.
pub const REPORT_CEILING: f64 = 0.95;

/// `0.3 + 0.5 * min(1, age / 80)`.
pub fn age_likelihood(age: f64) -> f64 {
    let age_factor = (age / AGE_SATURATION_YEARS).min(1.0);
    AGE_LIKELIHOOD_BASE + AGE_LIKELIHOOD_SPAN * age_factor
}

/// Odds-form update with the age likelihood.
pub fn adjust_for_age(posterior: f64, age: f64) -> f64 {
    let l = age_likelihood(age);
    posterior * l / (posterior * l + (1.0 - posterior) * (1.0 - l))
}

/// Likelihood-ratio update for male patients; identity otherwise.
pub fn adjust_for_gender(posterior: f64, is_male: bool) -> f64 {
    if !is_male {
        return posterior;
    }
    posterior * MALE_LIKELIHOOD_RATIO
        / (posterior * MALE_LIKELIHOOD_RATIO + (1.0 - posterior))
}

/// Hard override when pneumonia is already confirmed: Pneumonia is pinned,
/// Covid-19 is raised to its conditional floor. Not a blend.
pub fn apply_confirmed_pneumonia(condition: Condition, posterior: f64, confirmed: bool) -> f64 {
    if !confirmed {
        return posterior;
    }
    match condition {
        Condition::Pneumonia => CONFIRMED_PNEUMONIA_POSTERIOR,
        Condition::Covid19 => posterior.max(COVID_GIVEN_PNEUMONIA),
    }
}

// ---------------------------------------------------------------------------
// Reportable percentage
// ---------------------------------------------------------------------------

/// Clamp to [0, 0.95], scale to a percentage, round to 2 decimals.
pub fn to_percentage(posterior: f64) -> f64 {
    let clamped = posterior.min(REPORT_CEILING).max(0.0);
    round2(clamped * 100.0)
}

/// Round to 2 decimals on the exact binary value, as Python's `round(x, 2)`.
///
/// `(x * 100).round()` disagrees on inputs like 1.115, stored as
/// 1.11499999..., where the multiplication lands on 111.5 and rounds up.
/// The `{:.2}` formatter rounds the stored value itself, so 1.115 gives 1.11.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}
