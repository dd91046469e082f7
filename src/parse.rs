//! Edge list reader
//!
//! An interference graph file holds one edge per line, `v,w`. Blank lines and
//! lines starting with `#` are skipped; fields are trimmed.

pub mod parser {
  use std::fs;
  use std::path::Path;

  use anyhow::{Context, Result};
  use thiserror::Error;

  pub type Edge = (String, String);

  #[derive(Debug, Clone, PartialEq, Eq, Error)]
  pub enum ReadError {
    #[error("line {line}: expected `v,w`, found `{text}`")]
    Malformed { line: usize, text: String },
  }

  fn read_edge(line: usize, text: &str) -> Result<Edge, ReadError> {
    let malformed = || ReadError::Malformed {
      line,
      text: text.to_string(),
    };

    let (v, w) = text.split_once(',').ok_or_else(malformed)?;
    let (v, w) = (v.trim(), w.trim());
    if v.is_empty() || w.is_empty() {
      return Err(malformed());
    }
    Ok((v.to_string(), w.to_string()))
  }

  /// Parse every edge record of `input`, in order.
  pub fn parse_edges(input: &str) -> Result<Vec<Edge>, ReadError> {
    input
      .lines()
      .enumerate()
      .filter(|(_, text)| {
        let text = text.trim();
        !text.is_empty() && !text.starts_with('#')
      })
      .map(|(idx, text)| read_edge(idx + 1, text.trim()))
      .collect()
  }

  /// Read and parse an edge list file.
  pub fn load(path: &Path) -> Result<Vec<Edge>> {
    let input = fs::read_to_string(path)
      .with_context(|| format!("Couldn't read graph file {}", path.display()))?;
    let edges =
      parse_edges(&input).with_context(|| format!("Couldn't parse graph file {}", path.display()))?;
    log::info!("Read {} edges from {}", edges.len(), path.display());
    Ok(edges)
  }

  #[cfg(test)]
  mod tests {
    use super::*;

    fn e(v: &str, w: &str) -> Edge {
      (v.to_string(), w.to_string())
    }

    #[test]
    fn test_parse_edges() {
      let input = "a,b\nb, c\n\n# comment\n  c ,a  \n";
      assert_eq!(
        parse_edges(input).unwrap(),
        vec![e("a", "b"), e("b", "c"), e("c", "a")]
      );
    }

    #[test]
    fn test_parse_empty() {
      assert!(parse_edges("").unwrap().is_empty());
      assert!(parse_edges("\n\n# nothing\n").unwrap().is_empty());
    }

    #[test]
    fn test_first_comma_splits() {
      assert_eq!(parse_edges("x,y,z").unwrap(), vec![e("x", "y,z")]);
    }

    #[test]
    fn test_crlf_lines() {
      assert_eq!(
        parse_edges("a,b\r\nb,c\r\n").unwrap(),
        vec![e("a", "b"), e("b", "c")]
      );
    }

    #[test]
    fn test_malformed() {
      assert_eq!(
        parse_edges("a,b\nlonely\n"),
        Err(ReadError::Malformed {
          line: 2,
          text: "lonely".to_string()
        })
      );
      assert!(matches!(
        parse_edges("\n,b"),
        Err(ReadError::Malformed { line: 2, .. })
      ));
      assert!(parse_edges("a,").is_err());
    }

    #[test]
    fn test_load_sample() {
      let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("graphs/sample.csv");
      let edges = load(&path).unwrap();
      assert_eq!(edges.len(), 8);
      assert_eq!(edges[0], e("i", "n"));
      assert_eq!(edges[7], e("t2", "t1"));
    }

    #[test]
    fn test_load_missing_file() {
      let err = load(Path::new("/nonexistent/graph.csv")).unwrap_err();
      assert!(err.to_string().contains("Couldn't read graph file"));
    }
  }
}
