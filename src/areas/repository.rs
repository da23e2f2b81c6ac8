use crate::areas::database::Database;
use crate::areas::refs::Refs;
use std::cell::{RefCell, RefMut};
use std::path::Path;
use std::sync::Arc;

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Arc<Database>,
    refs: Arc<Refs>,
}

impl Repository {
    /// Open the repository whose work tree is `path`
    ///
    /// Nothing is created: the `.git` directory must already exist.
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;
        let git_path = path.join(".git");

        if !git_path.is_dir() {
            anyhow::bail!("not a git repository: {}", path.display());
        }

        let database = Database::new(git_path.join("objects").into_boxed_path());
        let refs = Refs::new(git_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database: Arc::new(database),
            refs: Arc::new(refs),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> Arc<Database> {
        self.database.clone()
    }

    pub fn refs(&self) -> Arc<Refs> {
        self.refs.clone()
    }
}
