//! ROI / impact calculator.
//!
//! Pure arithmetic over user-entered assumptions. Every function here is
//! synchronous and total: bad input is coerced rather than rejected, and no
//! formula can panic. Monetary outputs are kept as `f64` until display,
//! where [`round_currency`] rounds them to whole units.
//!
//! Three variants exist, selected per page with [`CalculatorVariant`]:
//!
//! - **lender ROI**: audit savings plus loss avoidance against platform cost
//! - **interest savings**: floorplan interest saved by an APR reduction
//! - **gross lift**: extra gross margin from faster inventory turns

use serde::{Deserialize, Deserializer, Serialize};

/// Basis points in one whole (100%).
const BPS_PER_UNIT: f64 = 10_000.0;

/// Months per year.
const MONTHS_PER_YEAR: f64 = 12.0;

// ── Input coercion ───────────────────────────────────────────────────

/// Parse a user-entered field into a number.
///
/// Blank text, non-numeric text, NaN and infinities all become `0.0`.
/// Surrounding whitespace and `,` thousands separators are ignored, so
/// `" 5,400,000 "` parses as `5_400_000.0`.
#[must_use]
pub fn coerce_number(raw: &str) -> f64 {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Clamp a percentage to `[0, 100]`. NaN becomes `0`.
#[must_use]
pub fn clamp_pct(pct: f64) -> f64 {
    if pct.is_nan() { 0.0 } else { pct.clamp(0.0, 100.0) }
}

/// Floor a value at zero. NaN and negative values become `0`.
fn non_negative(v: f64) -> f64 {
    if v.is_nan() || v < 0.0 { 0.0 } else { v }
}

/// Round a monetary value to the nearest whole unit, halves rounding up.
///
/// Values beyond the `i64` range saturate; NaN becomes `0`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_currency(value: f64) -> i64 {
    if value.is_nan() {
        return 0;
    }
    (value + 0.5).floor() as i64
}

/// Format a whole-unit amount as US dollars, e.g. `$4,100,000`.
#[must_use]
pub fn format_usd(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Deserialize a numeric field leniently: numbers pass through, strings go
/// through [`coerce_number`], anything else (null, bool, object) is `0`.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        serde_json::Value::String(s) => coerce_number(&s),
        _ => 0.0,
    })
}

// ── Lender ROI ───────────────────────────────────────────────────────

/// Assumptions for the lender ROI estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LenderRoiInputs {
    /// Average floorplan units on book.
    #[serde(deserialize_with = "lenient_number")]
    pub avg_units_on_book: f64,
    /// Platform cost per asset per month.
    #[serde(deserialize_with = "lenient_number")]
    pub per_unit_monthly_cost: f64,
    /// Current manual audit spend per year.
    #[serde(deserialize_with = "lenient_number")]
    pub manual_audit_cost_per_year: f64,
    /// Baseline out-of-trust losses per year.
    #[serde(deserialize_with = "lenient_number")]
    pub baseline_losses_per_year: f64,
    /// Expected share of baseline losses avoided, in percent.
    #[serde(deserialize_with = "lenient_number")]
    pub loss_avoidance_pct: f64,
}

impl Default for LenderRoiInputs {
    /// The figures the estimator opens with.
    fn default() -> Self {
        Self {
            avg_units_on_book: 15_000.0,
            per_unit_monthly_cost: 10.0,
            manual_audit_cost_per_year: 5_400_000.0,
            baseline_losses_per_year: 2_000_000.0,
            loss_avoidance_pct: 25.0,
        }
    }
}

/// Output of [`lender_roi`], unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LenderRoiEstimate {
    pub annual_platform_cost: f64,
    pub audit_savings: f64,
    pub loss_avoidance: f64,
    pub total_benefit: f64,
}

/// [`LenderRoiEstimate`] rounded to whole currency units for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundedLenderRoi {
    pub annual_platform_cost: i64,
    pub audit_savings: i64,
    pub loss_avoidance: i64,
    pub total_benefit: i64,
}

impl LenderRoiEstimate {
    /// Round every figure with [`round_currency`].
    #[must_use]
    pub fn rounded(&self) -> RoundedLenderRoi {
        RoundedLenderRoi {
            annual_platform_cost: round_currency(self.annual_platform_cost),
            audit_savings: round_currency(self.audit_savings),
            loss_avoidance: round_currency(self.loss_avoidance),
            total_benefit: round_currency(self.total_benefit),
        }
    }
}

/// Estimate audit savings and loss avoidance for a lender.
///
/// Negative inputs are treated as zero, so every output is non-negative.
#[must_use]
pub fn lender_roi(inputs: &LenderRoiInputs) -> LenderRoiEstimate {
    let units = non_negative(inputs.avg_units_on_book);
    let monthly = non_negative(inputs.per_unit_monthly_cost);
    let manual = non_negative(inputs.manual_audit_cost_per_year);
    let baseline = non_negative(inputs.baseline_losses_per_year);

    let annual_platform_cost = units * monthly * MONTHS_PER_YEAR;
    let audit_savings = (manual - annual_platform_cost).max(0.0);
    let loss_avoidance = baseline * clamp_pct(inputs.loss_avoidance_pct) / 100.0;

    LenderRoiEstimate {
        annual_platform_cost,
        audit_savings,
        loss_avoidance,
        total_benefit: audit_savings + loss_avoidance,
    }
}

// ── Dealer interest savings ──────────────────────────────────────────

/// Assumptions for the interest-savings variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InterestSavingsInputs {
    /// Outstanding floorplan exposure.
    #[serde(deserialize_with = "lenient_number")]
    pub exposure: f64,
    /// APR reduction in basis points.
    #[serde(deserialize_with = "lenient_number")]
    pub apr_reduction_bps: f64,
}

/// Output of [`interest_savings`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterestSavingsEstimate {
    pub monthly_interest_savings: f64,
    pub annual_interest_savings: f64,
}

#[must_use]
pub fn interest_savings(inputs: &InterestSavingsInputs) -> InterestSavingsEstimate {
    let exposure = non_negative(inputs.exposure);
    let bps = non_negative(inputs.apr_reduction_bps);

    let monthly = exposure * (bps / BPS_PER_UNIT) / MONTHS_PER_YEAR;
    InterestSavingsEstimate {
        monthly_interest_savings: monthly,
        annual_interest_savings: monthly * MONTHS_PER_YEAR,
    }
}

// ── Dealer gross lift ────────────────────────────────────────────────

/// Assumptions for the gross-lift variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrossLiftInputs {
    /// Additional inventory turns per year.
    #[serde(deserialize_with = "lenient_number")]
    pub delta_turns: f64,
    /// Vehicles currently on the floor.
    #[serde(deserialize_with = "lenient_number")]
    pub vehicles_on_floor: f64,
    /// Average front-end gross per vehicle.
    #[serde(deserialize_with = "lenient_number")]
    pub avg_gross_per_vehicle: f64,
}

/// Output of [`gross_lift`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrossLiftEstimate {
    pub gross_lift: f64,
}

#[must_use]
pub fn gross_lift(inputs: &GrossLiftInputs) -> GrossLiftEstimate {
    GrossLiftEstimate {
        gross_lift: non_negative(inputs.delta_turns)
            * non_negative(inputs.vehicles_on_floor)
            * non_negative(inputs.avg_gross_per_vehicle),
    }
}

// ── Variant dispatch ─────────────────────────────────────────────────

/// Which calculator a page renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculatorVariant {
    LenderRoi,
    InterestSavings,
    GrossLift,
}

/// Current inputs for one calculator variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Calculator {
    LenderRoi(LenderRoiInputs),
    InterestSavings(InterestSavingsInputs),
    GrossLift(GrossLiftInputs),
}

/// Rounded output of any calculator variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", rename_all = "kebab-case")]
pub enum Estimate {
    LenderRoi(RoundedLenderRoi),
    #[serde(rename_all = "camelCase")]
    InterestSavings {
        monthly_interest_savings: i64,
        annual_interest_savings: i64,
    },
    #[serde(rename_all = "camelCase")]
    GrossLift { gross_lift: i64 },
}

impl Calculator {
    /// A calculator for `variant` seeded with that variant's defaults.
    #[must_use]
    pub fn for_variant(variant: CalculatorVariant) -> Self {
        match variant {
            CalculatorVariant::LenderRoi => Self::LenderRoi(LenderRoiInputs::default()),
            CalculatorVariant::InterestSavings => {
                Self::InterestSavings(InterestSavingsInputs::default())
            }
            CalculatorVariant::GrossLift => Self::GrossLift(GrossLiftInputs::default()),
        }
    }

    #[must_use]
    pub fn variant(&self) -> CalculatorVariant {
        match self {
            Self::LenderRoi(_) => CalculatorVariant::LenderRoi,
            Self::InterestSavings(_) => CalculatorVariant::InterestSavings,
            Self::GrossLift(_) => CalculatorVariant::GrossLift,
        }
    }

    /// Recompute the rounded estimate from the current inputs.
    #[must_use]
    pub fn estimate(&self) -> Estimate {
        match self {
            Self::LenderRoi(inputs) => Estimate::LenderRoi(lender_roi(inputs).rounded()),
            Self::InterestSavings(inputs) => {
                let est = interest_savings(inputs);
                Estimate::InterestSavings {
                    monthly_interest_savings: round_currency(est.monthly_interest_savings),
                    annual_interest_savings: round_currency(est.annual_interest_savings),
                }
            }
            Self::GrossLift(inputs) => Estimate::GrossLift {
                gross_lift: round_currency(gross_lift(inputs).gross_lift),
            },
        }
    }
}
