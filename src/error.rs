use thiserror::Error;

/// Why a table could not be turned into JSON.
///
/// Each variant is a distinct reason; callers that only care about presence can
/// use [`crate::excel_table_to_json`], which collapses all of them to `None`.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// No input file was given.
    #[error("No input file provided")]
    MissingFile,

    /// Reading the input failed.
    #[error("Unable to read input: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes are not a workbook calamine can parse.
    #[error("Unable to parse Excel file: {0}")]
    Workbook(#[from] calamine::Error),

    /// A part of the xlsx package (relationships, table definitions) is broken.
    #[error("Invalid workbook package: {0}")]
    Package(String),

    #[error("Table '{name}' not found in any sheet")]
    TableNotFound { name: String },

    /// Two or more sheets register a table with the same name.
    #[error("Table '{name}' is defined in several sheets: {}", .sheets.join(", "))]
    AmbiguousTable { name: String, sheets: Vec<String> },

    #[error("Invalid range reference '{reference}'")]
    InvalidReference { reference: String },
}

impl ExtractError {
    /// Stable, machine-readable code for the failure.
    pub fn reason(&self) -> &'static str {
        match self {
            ExtractError::MissingFile => "missing_file",
            ExtractError::Io(_) => "io",
            ExtractError::Workbook(_) => "workbook",
            ExtractError::Package(_) => "package",
            ExtractError::TableNotFound { .. } => "table_not_found",
            ExtractError::AmbiguousTable { .. } => "ambiguous_table",
            ExtractError::InvalidReference { .. } => "invalid_reference",
        }
    }
}

impl From<zip::result::ZipError> for ExtractError {
    fn from(error: zip::result::ZipError) -> Self {
        ExtractError::Package(error.to_string())
    }
}

impl From<quick_xml::Error> for ExtractError {
    fn from(error: quick_xml::Error) -> Self {
        ExtractError::Package(error.to_string())
    }
}

impl From<quick_xml::encoding::EncodingError> for ExtractError {
    fn from(error: quick_xml::encoding::EncodingError) -> Self {
        ExtractError::Package(error.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for ExtractError {
    fn from(error: quick_xml::events::attributes::AttrError) -> Self {
        ExtractError::Package(error.to_string())
    }
}

pub type Result<T, E = ExtractError> = std::result::Result<T, E>;
