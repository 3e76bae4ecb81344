//! Column names of the two input datasets and of the derived tables.

// =============================================================================
// Employee attrition dataset (header row)
// =============================================================================

pub const AGE: &str = "Age";
pub const ATTRITION: &str = "Attrition";
pub const BUSINESS_TRAVEL: &str = "BusinessTravel";
pub const DISTANCE_FROM_HOME: &str = "DistanceFromHome";
/// Education level code 1-5, joined against the census education tier.
pub const EDUCATION: &str = "Education";
pub const EDUCATION_FIELD: &str = "EducationField";
pub const GENDER: &str = "Gender";
pub const MONTHLY_INCOME: &str = "MonthlyIncome";

/// Columns the employee file must provide.
pub const EMPLOYEE_REQUIRED_COLUMNS: [&str; 8] = [
    AGE,
    ATTRITION,
    BUSINESS_TRAVEL,
    DISTANCE_FROM_HOME,
    EDUCATION,
    EDUCATION_FIELD,
    GENDER,
    MONTHLY_INCOME,
];

pub const ATTRITION_YES: &str = "Yes";
pub const ATTRITION_NO: &str = "No";

pub const TRAVEL_RARELY: &str = "Travel_Rarely";
pub const TRAVEL_FREQUENTLY: &str = "Travel_Frequently";
pub const NON_TRAVEL: &str = "Non-Travel";

/// Business travel categories in reporting order.
pub const TRAVEL_CATEGORIES: [&str; 3] = [TRAVEL_RARELY, TRAVEL_FREQUENTLY, NON_TRAVEL];

// =============================================================================
// Census salary survey (no header row)
// =============================================================================

pub const JOB_TYPE: &str = "JobType";
pub const EDUCATION_LEVEL: &str = "EducationLevel";
pub const LEVEL: &str = "Level";
pub const JOB_POSITION: &str = "JobPosition";
pub const MARITAL_STATUS: &str = "MaritalStatus";
pub const LOCATION: &str = "Location";
pub const EXPECTED_SALARY_BAND: &str = "ExpectedSalaryBand";

/// Names applied to the census file, in file order.
pub const CENSUS_RAW_COLUMNS: [&str; 15] = [
    AGE,
    JOB_TYPE,
    "EmpID",
    EDUCATION_LEVEL,
    LEVEL,
    MARITAL_STATUS,
    JOB_POSITION,
    "MaritalStatusDesc",
    "Race",
    GENDER,
    "Column1",
    "Column2",
    "Column3",
    LOCATION,
    EXPECTED_SALARY_BAND,
];

/// Census columns retained after loading, in output order.
pub const CENSUS_COLUMNS: [&str; 9] = [
    AGE,
    JOB_TYPE,
    EDUCATION_LEVEL,
    LEVEL,
    JOB_POSITION,
    MARITAL_STATUS,
    LOCATION,
    GENDER,
    EXPECTED_SALARY_BAND,
];

// =============================================================================
// Derived columns
// =============================================================================

/// Reconciled census education tier (2-5, nullable).
pub const EDUCATION_TIER: &str = "EducationTier";
/// Mapped salary band value (0 or 100, nullable).
pub const SALARY_BAND_VALUE: &str = "SalaryBandValue";
pub const PROBABLE_SALARY_INDEX: &str = "ProbableSalaryIndex";
pub const ANNUAL_SALARY: &str = "AnnualSalary";
pub const COUNT: &str = "Count";
