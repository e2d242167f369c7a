use std::time::SystemTime;

/// A stat snapshot of one entry, taken when the engine probed it.
///
/// Owned and cloneable so that results outlive the scan and custom
/// [`Source`](crate::traits::Source) implementations can build one without
/// touching the disk. The engine itself only looks at [`kind`](Self::kind);
/// everything else is carried through to the caller untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// What kind of entry this is.
    pub kind: EntryKind,

    /// Size in bytes.
    pub len: u64,

    /// Last modification time, if the platform reports it.
    pub modified: Option<SystemTime>,

    /// Last access time, if the platform reports it.
    pub accessed: Option<SystemTime>,

    /// Creation time, if the platform reports it.
    pub created: Option<SystemTime>,

    /// Whether the entry is read-only.
    pub readonly: bool,

    /// Unix permission bits. `None` on other platforms.
    pub mode: Option<u32>,
}

impl Metadata {
    /// A bare snapshot of the given kind with every optional field unset.
    pub fn new(kind: EntryKind, len: u64) -> Self {
        Self {
            kind,
            len,
            modified: None,
            accessed: None,
            created: None,
            readonly: false,
            mode: None,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink
    }
}

impl From<std::fs::Metadata> for Metadata {
    fn from(meta: std::fs::Metadata) -> Self {
        let ft = meta.file_type();
        let kind = if ft.is_dir() {
            EntryKind::Dir
        } else if ft.is_file() {
            EntryKind::File
        } else if ft.is_symlink() {
            EntryKind::Symlink
        } else {
            EntryKind::Other
        };

        #[cfg(unix)]
        let mode = {
            use std::os::unix::fs::PermissionsExt;
            Some(meta.permissions().mode())
        };
        #[cfg(not(unix))]
        let mode = None;

        Self {
            kind,
            len: meta.len(),
            modified: meta.modified().ok(),
            accessed: meta.accessed().ok(),
            created: meta.created().ok(),
            readonly: meta.permissions().readonly(),
            mode,
        }
    }
}

/// The kind of a probed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A regular file.
    File,

    /// A directory. The only kind the engine descends into.
    Dir,

    /// A symbolic link. [`LocalFs`](crate::LocalFs) follows links, so this
    /// only shows up from custom sources.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}
