use tracing::debug;

use crate::dbc::core::strings;
use crate::dbc::types::database::DatabaseDBC;

/// Decode the BU_ line listing node names and register them in the database.
/// Example: `BU_: ECU1 ECU2 ECU3`
pub(crate) fn decode(db: &mut DatabaseDBC, line: &str) {
    // Split tokens, skip the "BU_"
    let parts: Vec<&str> = strings::header_tokens(line);
    if parts.first() != Some(&"BU_") {
        return;
    }

    for name in &parts[1..] {
        // creates if missing, returns existing ref otherwise
        db.add_node_if_absent(name);
    }
    debug!(nodes = parts.len() - 1, "decoded node list");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_colon_styles() {
        let mut db: DatabaseDBC = DatabaseDBC::default();
        decode(&mut db, "BU_: Engine Cab");
        decode(&mut db, "BU_ : Trans Engine");
        assert_eq!(db.node_names(), vec!["Engine", "Cab", "Trans"]);
    }

    #[test]
    fn other_keywords_are_ignored() {
        let mut db: DatabaseDBC = DatabaseDBC::default();
        decode(&mut db, "BU_SG_REL_ ;");
        decode(&mut db, "BU_:");
        assert!(db.is_empty());
    }
}
