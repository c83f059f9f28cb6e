use std::fmt;

use crate::{
    ast::{Expr, IndexExpr, TokenKind},
    error::{ErrorKind, FilterError},
};

/// A segment of a field path.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Named access, from an identifier or a string index
    ///
    /// # Examples
    /// - `user` → `Field("user")`
    /// - `user["name"]` → `[Field("user"), Field("name")]`
    Field(String),

    /// Numeric index, kept in normalized decimal form
    ///
    /// # Examples
    /// - `tags[0]` → `[Field("tags"), Index("0")]`
    /// - `grid[1.50]` → `[Field("grid"), Index("1.5")]`
    Index(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) | PathSegment::Index(name) => f.write_str(name),
        }
    }
}

/// Field path from an identifier through each chained index, in source order.
///
/// For `user["profile"]["name"]`:
/// - `PathSegment::Field("user")`
/// - `PathSegment::Field("profile")`
/// - `PathSegment::Field("name")`
pub type Path = Vec<PathSegment>;

/// Extract the path of an identifier or index chain.
///
/// ```
/// use vfilter::ast::builders::index;
/// use vfilter::path::{dotted, extract_path};
///
/// let path = extract_path(&index(index("user", "profile"), "name")).unwrap();
/// assert_eq!(dotted(&path), "user.profile.name");
///
/// let path = extract_path(&index("tags", 0)).unwrap();
/// assert_eq!(dotted(&path), "tags.0");
/// ```
pub fn extract_path(expr: &Expr) -> Result<Path, FilterError> {
    let mut segments = Vec::new();
    extract_path_recursive(expr, &mut segments)?;
    Ok(segments)
}

fn extract_path_recursive(expr: &Expr, segments: &mut Path) -> Result<(), FilterError> {
    match expr {
        Expr::Ident(ident) => {
            segments.push(PathSegment::Field(ident.value.clone()));
            Ok(())
        }

        Expr::Index(index) => extend_index_path(index, segments),

        other => Err(FilterError::new(
            ErrorKind::IndexLeftShape,
            format!("cannot derive a field path from {}", other.describe()),
            other.position(),
        )),
    }
}

/// Path of an index chain given the outermost index node.
pub fn extract_index_path(index: &IndexExpr) -> Result<Path, FilterError> {
    let mut segments = Vec::new();
    extend_index_path(index, &mut segments)?;
    Ok(segments)
}

fn extend_index_path(index: &IndexExpr, segments: &mut Path) -> Result<(), FilterError> {
    // Base first, so segments come out left to right
    extract_path_recursive(&index.left, segments)?;
    segments.push(index_segment(index)?);
    Ok(())
}

fn index_segment(index: &IndexExpr) -> Result<PathSegment, FilterError> {
    match index.index.kind() {
        // Strings go in verbatim, no quoting or escaping
        TokenKind::String => Ok(PathSegment::Field(index.index.value.clone())),
        TokenKind::Number => Ok(PathSegment::Index(index.index.value.clone())),
        other => Err(FilterError::new(
            ErrorKind::IndexNotScalar,
            format!("index must be a number or string, found {}", other.name()),
            index.index.token.start,
        )),
    }
}

/// Joins a path with `.`.
pub fn dotted(path: &Path) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}
