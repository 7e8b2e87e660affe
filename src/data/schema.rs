//! Fixed predictor schema for the house-prices tables.
//!
//! The original recipe duplicated its 36-column allow-list across the training
//! select, the test select, and the model formula. Here the schema is defined
//! once as an ordered list of field descriptors consumed by loading, cleaning,
//! training, and prediction alike, so the two tables cannot drift apart.

/// One predictor field: the raw CSV header it is read from and the cleaned
/// name it is exposed under.
///
/// Three source headers start with a digit and are renamed on load
/// (`1stFlrSF`, `2ndFlrSF`, `3SsnPorch`); for the rest the two names match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Column header in the source CSV.
    pub source: &'static str,
    /// Cleaned column name.
    pub name: &'static str,
}

const fn field(source: &'static str, name: &'static str) -> FieldDescriptor {
    FieldDescriptor { source, name }
}

/// Identifier column, present in both tables.
pub const ID_COLUMN: &str = "Id";

/// Target column, present in the training table only.
pub const TARGET_COLUMN: &str = "SalePrice";

/// The fixed ordered predictor set.
///
/// Order matters only in that it is the enumeration order used everywhere:
/// column storage, split candidate indices, and feature importance all use
/// the position of a field in this array.
pub const PREDICTORS: [FieldDescriptor; 36] = [
    field("MSSubClass", "MSSubClass"),
    field("LotFrontage", "LotFrontage"),
    field("LotArea", "LotArea"),
    field("OverallQual", "OverallQual"),
    field("OverallCond", "OverallCond"),
    field("YearBuilt", "YearBuilt"),
    field("YearRemodAdd", "YearRemodAdd"),
    field("MasVnrArea", "MasVnrArea"),
    field("BsmtFinSF1", "BsmtFinSF1"),
    field("BsmtFinSF2", "BsmtFinSF2"),
    field("BsmtUnfSF", "BsmtUnfSF"),
    field("TotalBsmtSF", "TotalBsmtSF"),
    field("1stFlrSF", "FirstFlrSF"),
    field("2ndFlrSF", "SecondFlrSF"),
    field("LowQualFinSF", "LowQualFinSF"),
    field("GrLivArea", "GrLivArea"),
    field("BsmtFullBath", "BsmtFullBath"),
    field("BsmtHalfBath", "BsmtHalfBath"),
    field("FullBath", "FullBath"),
    field("HalfBath", "HalfBath"),
    field("BedroomAbvGr", "BedroomAbvGr"),
    field("KitchenAbvGr", "KitchenAbvGr"),
    field("TotRmsAbvGrd", "TotRmsAbvGrd"),
    field("Fireplaces", "Fireplaces"),
    field("GarageYrBlt", "GarageYrBlt"),
    field("GarageCars", "GarageCars"),
    field("GarageArea", "GarageArea"),
    field("WoodDeckSF", "WoodDeckSF"),
    field("OpenPorchSF", "OpenPorchSF"),
    field("EnclosedPorch", "EnclosedPorch"),
    field("3SsnPorch", "ThreeSsnPorch"),
    field("ScreenPorch", "ScreenPorch"),
    field("PoolArea", "PoolArea"),
    field("MiscVal", "MiscVal"),
    field("MoSold", "MoSold"),
    field("YrSold", "YrSold"),
];

/// Number of predictor fields.
pub const N_PREDICTORS: usize = PREDICTORS.len();

/// Look up a predictor index by cleaned name.
pub fn predictor_index(name: &str) -> Option<usize> {
    PREDICTORS.iter().position(|f| f.name == name)
}
