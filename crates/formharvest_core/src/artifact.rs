use std::fmt;

/// One downloadable representation of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    Tsv,
    Html,
    Stats,
}

impl ArtifactKind {
    /// Processing order within one form.
    pub const ALL: [ArtifactKind; 3] = [ArtifactKind::Tsv, ArtifactKind::Html, ArtifactKind::Stats];

    /// Subdirectory of the output tree holding this kind.
    pub fn dir_name(self) -> &'static str {
        match self {
            ArtifactKind::Tsv => "tsv",
            ArtifactKind::Html => "html",
            ArtifactKind::Stats => "stats",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ArtifactKind::Tsv => "tsv",
            ArtifactKind::Html => "html",
            ArtifactKind::Stats => "json",
        }
    }

    pub fn file_name(self, stem: &str) -> String {
        format!("{stem}.{}", self.extension())
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Subset of artifact kinds requested for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactSelection {
    tsv: bool,
    html: bool,
    stats: bool,
}

impl ArtifactSelection {
    pub fn all() -> Self {
        Self {
            tsv: true,
            html: true,
            stats: true,
        }
    }

    /// Build from per-kind flags; no flag set means every kind.
    pub fn from_flags(tsv: bool, html: bool, stats: bool) -> Self {
        if !(tsv || html || stats) {
            return Self::all();
        }
        Self { tsv, html, stats }
    }

    pub fn only(kinds: &[ArtifactKind]) -> Self {
        Self::from_flags(
            kinds.contains(&ArtifactKind::Tsv),
            kinds.contains(&ArtifactKind::Html),
            kinds.contains(&ArtifactKind::Stats),
        )
    }

    pub fn contains(&self, kind: ArtifactKind) -> bool {
        match kind {
            ArtifactKind::Tsv => self.tsv,
            ArtifactKind::Html => self.html,
            ArtifactKind::Stats => self.stats,
        }
    }

    /// Requested kinds in processing order: tsv, html, stats.
    pub fn kinds(&self) -> impl Iterator<Item = ArtifactKind> + '_ {
        ArtifactKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

impl Default for ArtifactSelection {
    fn default() -> Self {
        Self::all()
    }
}
