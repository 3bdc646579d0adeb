use crate::error::AlertaError;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// Lê o arquivo de objids (um por linha). Linhas vazias são ignoradas.
pub fn read_objids(path: impl AsRef<Path>) -> Result<HashSet<i64>, AlertaError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| AlertaError::ConfigRead {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_objids(&content))
}

/// Igual a `read_objids`, mas degrada para conjunto vazio em caso de erro.
pub fn load_objids(path: impl AsRef<Path>) -> HashSet<i64> {
    match read_objids(path) {
        Ok(ids) => {
            info!("{} objids de sensores carregados: {:?}", ids.len(), ids);
            ids
        }
        Err(e) => {
            warn!("{}. Seguindo sem sensores monitorados.", e);
            HashSet::new()
        }
    }
}

fn parse_objids(content: &str) -> HashSet<i64> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match line.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!("Linha ignorada no arquivo de sensores: {:?}", line);
                None
            }
        })
        .collect()
}
