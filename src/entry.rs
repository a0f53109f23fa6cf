use std::fs::FileType;
use std::path::{Component, Path};

/// A single directory entry produced while walking.
///
/// Built fresh for every item the directory stream yields and handed to the
/// matching action through [`Context`](crate::Context). The engine does not
/// keep it once the action has returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The entry's base name. Non-UTF-8 names are converted lossily.
    pub name: String,

    /// What kind of entry this is, as reported by the directory stream.
    pub kind: EntryKind,
}

impl Entry {
    /// The pseudo-entry dispatched for the walk root when top-level inclusion
    /// is requested. A root given as `.` gets an empty name.
    pub(crate) fn root(path: &Path) -> Self {
        let name = match path.components().next_back() {
            Some(Component::CurDir) | None => String::new(),
            _ => base_name(path),
        };
        Self {
            name,
            kind: EntryKind::Dir,
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

/// The kind of a directory entry.
///
/// Classification never follows symbolic links: a link to a directory is a
/// [`Symlink`](EntryKind::Symlink), and the walk does not descend through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A directory.
    Dir,

    /// A regular file.
    File,

    /// A symbolic link.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}

impl From<FileType> for EntryKind {
    fn from(ft: FileType) -> Self {
        if ft.is_dir() {
            Self::Dir
        } else if ft.is_file() {
            Self::File
        } else if ft.is_symlink() {
            Self::Symlink
        } else {
            Self::Other
        }
    }
}

/// Last component of `path` the way it appears on the ancestor stack.
///
/// `.` and `..` are kept as-is; a bare root (`/`) has an empty name.
pub(crate) fn base_name(path: &Path) -> String {
    match path.components().next_back() {
        Some(Component::Normal(name)) => name.to_string_lossy().into_owned(),
        Some(Component::CurDir) => ".".to_owned(),
        Some(Component::ParentDir) => "..".to_owned(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_of_plain_and_relative_paths() {
        assert_eq!(base_name(Path::new("a/b/c")), "c");
        assert_eq!(base_name(Path::new("./sub")), "sub");
        assert_eq!(base_name(Path::new("sub/")), "sub");
        assert_eq!(base_name(Path::new(".")), ".");
        assert_eq!(base_name(Path::new("./")), ".");
        assert_eq!(base_name(Path::new("..")), "..");
        assert_eq!(base_name(Path::new("/")), "");
    }

    #[test]
    fn root_entry_is_an_unnamed_dir_for_current_directory() {
        let dot = Entry::root(Path::new("."));
        assert_eq!(dot.name, "");
        assert!(dot.is_dir());

        let named = Entry::root(Path::new("./tests"));
        assert_eq!(named.name, "tests");
        assert_eq!(named.kind, EntryKind::Dir);
    }

    #[test]
    fn kind_from_file_type_does_not_follow_links() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f");
        std::fs::write(&file, b"x").unwrap();

        let ft = std::fs::symlink_metadata(dir.path()).unwrap().file_type();
        assert_eq!(EntryKind::from(ft), EntryKind::Dir);
        let ft = std::fs::symlink_metadata(&file).unwrap().file_type();
        assert_eq!(EntryKind::from(ft), EntryKind::File);

        #[cfg(unix)]
        {
            let link = dir.path().join("l");
            std::os::unix::fs::symlink(dir.path(), &link).unwrap();
            let ft = std::fs::symlink_metadata(&link).unwrap().file_type();
            assert_eq!(EntryKind::from(ft), EntryKind::Symlink);
        }
    }
}
