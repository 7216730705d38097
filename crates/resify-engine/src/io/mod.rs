use crate::models::Resume;
use relative_path::RelativePath;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("cannot read {name}: {source}")]
    Read {
        name: String,
        source: std::io::Error,
    },
    #[error("cannot parse {name} as YAML: {source}")]
    Parse {
        name: String,
        source: serde_yaml::Error,
    },
    #[error("cannot write YAML: {0}")]
    Write(#[from] serde_yaml::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    #[error("attempt to leave data directory via embed: {0}")]
    Escape(String),
    #[error("cannot embed {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Whether `path` names standard input.
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str().is_empty() || path == Path::new("-")
}

/// Read a resume from a YAML file, or from stdin for `-` or an empty path
pub fn read_resume(path: &Path) -> Result<Resume, IoError> {
    if is_stdin(path) {
        return read_resume_from(std::io::stdin().lock(), "stdin");
    }

    let name = path.display().to_string();
    let file = fs::File::open(path).map_err(|source| IoError::Read {
        name: name.clone(),
        source,
    })?;
    read_resume_from(file, &name)
}

/// Read a resume from any reader; `name` is only used in errors
pub fn read_resume_from<R: Read>(mut reader: R, name: &str) -> Result<Resume, IoError> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|source| IoError::Read {
            name: name.to_string(),
            source,
        })?;

    serde_yaml::from_str(&content).map_err(|source| IoError::Parse {
        name: name.to_string(),
        source,
    })
}

/// Write a resume as YAML
pub fn write_yaml<W: Write>(resume: &Resume, writer: W) -> Result<(), IoError> {
    serde_yaml::to_writer(writer, resume)?;
    Ok(())
}

/// Read a file beneath `data_dir` for embedding in a template.
///
/// `path` is normalized first; anything that would climb out of `data_dir`
/// is refused. A leading `/` is taken relative to `data_dir` as well.
pub fn read_embedded(data_dir: &Path, path: &str) -> Result<String, EmbedError> {
    let relative = RelativePath::new(path).normalize();
    if relative.as_str() == ".." || relative.as_str().starts_with("../") {
        return Err(EmbedError::Escape(path.to_string()));
    }

    let absolute_path = relative.to_path(data_dir);
    fs::read_to_string(&absolute_path).map_err(|source| EmbedError::Io {
        path: absolute_path,
        source,
    })
}
