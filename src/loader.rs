//! 食材CSVの読み込み
//!
//! ファイルを一度だけ読み込み、閉じてからパースする。

use crate::error::{IngredientError, Result};
use ingredient_similarity_common::{parse_ingredients, IngredientRecord};
use std::path::Path;

pub fn load_ingredients(path: &Path) -> Result<Vec<IngredientRecord>> {
    if !path.is_file() {
        return Err(IngredientError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;

    Ok(parse_ingredients(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_not_found() {
        let result = load_ingredients(Path::new("/nonexistent/ingredients.csv"));
        assert!(matches!(result, Err(IngredientError::FileNotFound(_))));
    }

    #[test]
    fn test_load_directory_is_not_a_file() {
        let temp_dir = std::env::temp_dir();
        let result = load_ingredients(&temp_dir);
        assert!(matches!(result, Err(IngredientError::FileNotFound(_))));
    }

    #[test]
    fn test_load_file() {
        let temp_dir = std::env::temp_dir().join("ingredient-similarity-test-load");
        fs::create_dir_all(&temp_dir).unwrap();
        let path = temp_dir.join("ingredients.csv");
        fs::write(
            &path,
            "id,name,shelf_life,opened_shelf_life,created_at\n1,Flour,365,30,2023-01-01T00:00:00\n",
        )
        .unwrap();

        let records = load_ingredients(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Flour");

        fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn test_load_bad_timestamp_is_common_error() {
        let temp_dir = std::env::temp_dir().join("ingredient-similarity-test-bad-ts");
        fs::create_dir_all(&temp_dir).unwrap();
        let path = temp_dir.join("ingredients.csv");
        fs::write(
            &path,
            "id,name,shelf_life,opened_shelf_life,created_at\n1,Flour,365,30,01/01/2023\n",
        )
        .unwrap();

        let result = load_ingredients(&path);
        assert!(matches!(
            result,
            Err(IngredientError::Common(
                ingredient_similarity_common::Error::InvalidTimestamp { row: 1, .. }
            ))
        ));

        fs::remove_dir_all(&temp_dir).ok();
    }
}
