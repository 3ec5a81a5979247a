//! Creator tax estimator and compound-interest projection.
//!
//! Pure calculation surface behind the insights page. The estimator compares
//! the two options available to self-employed Filipinos under the TRAIN law:
//! graduated rates on (gross minus the 40% Optional Standard Deduction) plus
//! the 3% percentage tax, versus the 8% flat rate on gross above the 250k
//! exemption, which replaces both and is only available under the 3M VAT
//! threshold. Estimates only - actual liability depends on deductions and
//! BIR filings.

/// One graduated bracket: tax is `base + (taxable - min) * rate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxBracket {
    /// Lower bound of the bracket
    pub min: f64,
    /// Marginal rate within the bracket
    pub rate: f64,
    /// Tax accumulated by the lower brackets
    pub base: f64,
}

/// TRAIN-law graduated brackets (2023+).
pub const GRADUATED_BRACKETS: [TaxBracket; 6] = [
    TaxBracket {
        min: 0.0,
        rate: 0.0,
        base: 0.0,
    },
    TaxBracket {
        min: 250_000.0,
        rate: 0.15,
        base: 0.0,
    },
    TaxBracket {
        min: 400_000.0,
        rate: 0.20,
        base: 22_500.0,
    },
    TaxBracket {
        min: 800_000.0,
        rate: 0.25,
        base: 102_500.0,
    },
    TaxBracket {
        min: 2_000_000.0,
        rate: 0.30,
        base: 402_500.0,
    },
    TaxBracket {
        min: 8_000_000.0,
        rate: 0.35,
        base: 2_202_500.0,
    },
];

/// 40% Optional Standard Deduction.
pub const OSD_RATE: f64 = 0.4;

/// 3% quarterly percentage tax on gross receipts.
pub const PERCENTAGE_TAX_RATE: f64 = 0.03;

/// Gross-receipts ceiling for the 8% flat option (VAT threshold).
pub const FLAT8_GROSS_CEILING: f64 = 3_000_000.0;

/// Annual exemption subtracted before applying the 8% rate.
pub const FLAT8_EXEMPTION: f64 = 250_000.0;

/// Breakdown of the graduated option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraduatedTax {
    /// Income tax on the post-OSD taxable amount
    pub income_tax: f64,
    /// 3% percentage tax on gross
    pub percentage_tax: f64,
    /// Gross minus the 40% OSD
    pub taxable_income: f64,
    /// Sum of both components
    pub total: f64,
}

/// Which option the estimator recommends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxOption {
    /// 8% flat on gross above the exemption
    Flat8,
    /// Graduated rates plus percentage tax
    Graduated,
}

/// Graduated income tax on taxable income (after deductions).
#[must_use]
pub fn graduated_income_tax(taxable_income: f64) -> f64 {
    for bracket in GRADUATED_BRACKETS.iter().rev() {
        if taxable_income > bracket.min {
            return bracket.base + (taxable_income - bracket.min) * bracket.rate;
        }
    }
    0.0
}

/// Total tax under the graduated option for annual gross receipts.
#[must_use]
pub fn graduated_total(gross: f64) -> GraduatedTax {
    let taxable_income = gross * (1.0 - OSD_RATE);
    let income_tax = graduated_income_tax(taxable_income);
    let percentage_tax = gross * PERCENTAGE_TAX_RATE;
    GraduatedTax {
        income_tax,
        percentage_tax,
        taxable_income,
        total: income_tax + percentage_tax,
    }
}

/// Total tax under the 8% flat option, or `None` when gross receipts exceed
/// the VAT threshold and the option is unavailable.
#[must_use]
pub fn flat8(gross: f64) -> Option<f64> {
    if gross > FLAT8_GROSS_CEILING {
        return None;
    }
    Some(((gross - FLAT8_EXEMPTION) * 0.08).max(0.0))
}

/// Recommends the cheaper eligible option for annual gross receipts.
#[must_use]
pub fn recommend(gross: f64) -> TaxOption {
    let graduated = graduated_total(gross);
    match flat8(gross) {
        Some(flat) if flat <= graduated.total => TaxOption::Flat8,
        _ => TaxOption::Graduated,
    }
}

/// One year of the compound-interest projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearPoint {
    /// Year index, 1-based
    pub year: u32,
    /// Total deposited by end of year
    pub deposited: f64,
    /// Interest earned by end of year
    pub interest: f64,
    /// Deposits plus interest
    pub total: f64,
}

/// Future value of a fixed monthly deposit compounding monthly.
#[must_use]
pub fn future_value(monthly: f64, annual_rate_pct: f64, years: u32) -> f64 {
    let monthly_rate = annual_rate_pct / 100.0 / 12.0;
    let months = f64::from(years * 12);
    if monthly_rate > 0.0 {
        monthly * (((1.0 + monthly_rate).powf(months) - 1.0) / monthly_rate)
    } else {
        monthly * months
    }
}

/// Year-by-year projection for charting.
#[must_use]
pub fn projection(monthly: f64, annual_rate_pct: f64, years: u32) -> Vec<YearPoint> {
    (1..=years)
        .map(|year| {
            let total = future_value(monthly, annual_rate_pct, year);
            let deposited = monthly * f64::from(year * 12);
            YearPoint {
                year,
                deposited,
                interest: total - deposited,
                total,
            }
        })
        .collect()
}
