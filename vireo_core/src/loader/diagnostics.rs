use std::fmt;

/// What went wrong with one entry of a document. Each of these is
/// recoverable; the affected binding is skipped or defaulted and the
/// parse carries on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    UnsupportedGeometryType,
    UnsupportedAttributeType,
    UnsupportedNodeType,
    UnresolvedGeometry,
    UnresolvedMaterial,
    UnresolvedTexture,
    UnresolvedImage,
    UnresolvedBuffer,
    UnresolvedBone,
    UnresolvedSkeleton,
    UnresolvedLodObject,
    UnresolvedLightTarget,
    UnresolvedAnimation,
    MalformedEntry,
}

impl DiagnosticKind {
    fn label(&self) -> &'static str {
        match self {
            Self::UnsupportedGeometryType => "unsupported geometry type",
            Self::UnsupportedAttributeType => "unsupported attribute type",
            Self::UnsupportedNodeType => "unsupported object type",
            Self::UnresolvedGeometry => "unresolved geometry reference",
            Self::UnresolvedMaterial => "unresolved material reference",
            Self::UnresolvedTexture => "unresolved texture reference",
            Self::UnresolvedImage => "unresolved image reference",
            Self::UnresolvedBuffer => "unresolved buffer reference",
            Self::UnresolvedBone => "unresolved bone reference",
            Self::UnresolvedSkeleton => "unresolved skeleton reference",
            Self::UnresolvedLodObject => "unresolved level-of-detail object",
            Self::UnresolvedLightTarget => "unresolved light target",
            Self::UnresolvedAnimation => "unresolved animation reference",
            Self::MalformedEntry => "malformed entry",
        }
    }
}

/// One recoverable problem, kept for the caller alongside the warning
/// that was logged when it happened.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub detail: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.detail)
    }
}

/// Collector threaded through the whole parse.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, kind: DiagnosticKind, detail: impl Into<String>) {
        let diag = Diagnostic {
            kind,
            detail: detail.into(),
        };
        log::warn!("{diag}");
        self.entries.push(diag);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }

    pub fn has(&self, kind: DiagnosticKind) -> bool {
        self.entries.iter().any(|d| d.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
