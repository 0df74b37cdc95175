use serde_json::Value;

use crate::error::{Error, Result};
use crate::node::{self, CHILDREN_KEY};

/// `nodeType` of solc struct definitions.
pub const STRUCT_DEFINITION: &str = "StructDefinition";

/// Lazy pre-order, depth-first search over an AST.
///
/// Yields every node (the root included) accepted by the predicate, parents
/// before children and siblings in declaration order. A node whose children
/// are not an array of objects is still yielded if it matches, then one error
/// ends the search.
pub struct Search<'a, P> {
    stack: Vec<&'a Value>,
    pending: Option<Error>,
    predicate: P,
}

pub fn search<P>(root: &Value, predicate: P) -> Search<'_, P>
where
    P: FnMut(&Value) -> bool,
{
    Search {
        stack: vec![root],
        pending: None,
        predicate,
    }
}

/// Every struct definition under `root`.
pub fn struct_definitions(root: &Value) -> Search<'_, fn(&Value) -> bool> {
    search(root, is_struct_definition as fn(&Value) -> bool)
}

pub fn is_struct_definition(node: &Value) -> bool {
    node.get("nodeType").and_then(Value::as_str) == Some(STRUCT_DEFINITION)
}

impl<'a, P> Iterator for Search<'a, P>
where
    P: FnMut(&Value) -> bool,
{
    type Item = Result<&'a Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.pending.take() {
            return Some(Err(err));
        }
        while let Some(node) = self.stack.pop() {
            let matched = (self.predicate)(node);
            match shaped_children(node) {
                Ok(children) => self.stack.extend(children.iter().rev()),
                Err(err) => {
                    self.stack.clear();
                    if !matched {
                        return Some(Err(err));
                    }
                    self.pending = Some(err);
                }
            }
            if matched {
                return Some(Ok(node));
            }
        }
        None
    }
}

fn shaped_children(node: &Value) -> Result<&[Value]> {
    let children = node::children(node)?;
    if !children.iter().all(Value::is_object) {
        return Err(Error::malformed(&[CHILDREN_KEY], "array of nodes"));
    }
    Ok(children)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> Value {
        json!({
            "id": 0,
            "nodes": [
                {"id": 1, "nodes": [{"id": 2}, {"id": 3, "nodes": [{"id": 4}]}]},
                {"id": 5},
                {"id": 6, "nodes": []}
            ]
        })
    }

    fn ids<'a>(found: impl Iterator<Item = Result<&'a Value>>) -> Vec<u64> {
        found
            .map(|node| node.unwrap()["id"].as_u64().unwrap())
            .collect()
    }

    #[test]
    fn accept_all_is_preorder() {
        let ast = sample();
        assert_eq!(ids(search(&ast, |_| true)), [0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn reject_all_yields_nothing() {
        let ast = sample();
        assert_eq!(search(&ast, |_| false).count(), 0);
    }

    #[test]
    fn predicate_filters() {
        let ast = sample();
        let even = ids(search(&ast, |node| node["id"].as_u64().unwrap() % 2 == 0));
        assert_eq!(even, [0, 2, 4, 6]);
    }

    #[test]
    fn finds_nested_structs() {
        let ast = json!({
            "nodeType": "SourceUnit",
            "nodes": [
                {"nodeType": "StructDefinition", "name": "Top"},
                {"nodeType": "ContractDefinition", "nodes": [
                    {"nodeType": "StructDefinition", "name": "Inner"},
                    {"nodeType": "FunctionDefinition"}
                ]}
            ]
        });
        let names: Vec<&str> = struct_definitions(&ast)
            .map(|node| node.unwrap()["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Top", "Inner"]);
    }

    #[test]
    fn malformed_children_fail_fast() {
        let ast = json!({"id": 0, "nodes": [{"id": 1, "nodes": "oops"}, {"id": 2}]});
        let mut found = search(&ast, |_| true);
        assert_eq!(found.next().unwrap().unwrap()["id"], 0);
        assert_eq!(found.next().unwrap().unwrap()["id"], 1);
        assert!(matches!(found.next(), Some(Err(Error::MalformedNode { .. }))));
        assert!(found.next().is_none());

        let ast = json!({"nodes": [1, 2]});
        let mut found = search(&ast, |_| false);
        assert!(found.next().unwrap().is_err());
        assert!(found.next().is_none());
    }

    #[test]
    fn matching_node_precedes_its_malformed_children() {
        let ast = json!({"id": 0, "nodes": [{"id": 1, "nodes": [7]}, {"id": 2}]});
        let mut found = search(&ast, |node| node["id"] == 1);
        let node = found.next().unwrap().unwrap();
        assert_eq!(node["id"], 1);
        assert!(matches!(found.next(), Some(Err(Error::MalformedNode { .. }))));
        assert!(found.next().is_none());
    }
}
