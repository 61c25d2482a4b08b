//! Field schemas for `sacct --parsable2` output.

/// Ordered column layout requested from sacct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordSchema {
    /// JobID, User, Account, State, ExitCode
    #[default]
    Short,
    /// Short columns plus Start, End, Elapsed, NodeList, ElapsedRaw, Partition
    Extended,
}

const SHORT_FIELDS: &[&str] = &["JobID", "User", "Account", "State", "ExitCode"];

const EXTENDED_FIELDS: &[&str] = &[
    "JobID",
    "User",
    "Account",
    "State",
    "ExitCode",
    "Start",
    "End",
    "Elapsed",
    "NodeList",
    "ElapsedRaw",
    "Partition",
];

impl RecordSchema {
    /// Column names in output order.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Short => SHORT_FIELDS,
            Self::Extended => EXTENDED_FIELDS,
        }
    }

    /// Minimum number of fields a line must have.
    pub fn field_count(self) -> usize {
        self.fields().len()
    }

    /// Value for `sacct --format=`.
    pub fn format_arg(self) -> String {
        self.fields().join(",")
    }

    pub fn is_extended(self) -> bool {
        matches!(self, Self::Extended)
    }
}
