use std::collections::BTreeMap;

use alloy_dyn_abi::TypedData;
use alloy_primitives::B256;
use serde_json::{json, Map, Value};

use crate::coerce::FieldValue;
use crate::error::{Error, Result};
use crate::schema::TypeRegistry;

/// Computes EIP-712 `hashStruct` for a struct whose type graph is described by
/// a [`TypeRegistry`].
pub trait StructHasher {
    fn hash_struct(
        &self,
        primary_type: &str,
        registry: &TypeRegistry,
        values: &BTreeMap<String, FieldValue>,
    ) -> Result<B256>;
}

/// [`StructHasher`] backed by alloy's dynamic EIP-712 encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Eip712Hasher;

impl StructHasher for Eip712Hasher {
    fn hash_struct(
        &self,
        primary_type: &str,
        registry: &TypeRegistry,
        values: &BTreeMap<String, FieldValue>,
    ) -> Result<B256> {
        let typed = typed_data(primary_type, registry, values)?;
        Ok(typed.hash_struct()?)
    }
}

/// Assemble typed data with an empty domain. Only the message's struct hash
/// is meaningful; the domain separator is left to the caller.
pub fn typed_data(
    primary_type: &str,
    registry: &TypeRegistry,
    values: &BTreeMap<String, FieldValue>,
) -> Result<TypedData> {
    let message: Map<String, Value> = values
        .iter()
        .map(|(name, value)| (name.clone(), Value::from(value.clone())))
        .collect();
    let typed = json!({
        "types": registry.to_eip712_types(),
        "primaryType": primary_type,
        "domain": {},
        "message": message,
    });
    serde_json::from_value(typed).map_err(Error::TypedData)
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, keccak256};
    use alloy_sol_types::{sol, SolStruct};

    use super::*;
    use crate::schema::{FieldSchema, StructSchema};

    sol! {
        struct Asset {
            address addr;
            uint256 amount;
        }

        struct Order {
            bool isBuy;
            Asset asset;
        }
    }

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::default();
        registry.insert(StructSchema {
            name: "Asset".into(),
            fields: vec![
                FieldSchema::new("addr", "address"),
                FieldSchema::new("amount", "uint256"),
            ],
        });
        registry.insert(StructSchema {
            name: "Order".into(),
            fields: vec![FieldSchema::new("isBuy", "bool"), FieldSchema::new("asset", "Asset")],
        });
        registry
    }

    #[test]
    fn flat_struct_matches_sol_macro() {
        let addr = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
        let values = BTreeMap::from([
            ("addr".to_owned(), FieldValue::Raw(addr.to_string())),
            ("amount".to_owned(), FieldValue::Raw("1000".to_owned())),
        ]);
        let digest = Eip712Hasher.hash_struct("Asset", &registry(), &values).unwrap();

        let expected = Asset { addr, amount: alloy_primitives::U256::from(1000) }.eip712_hash_struct();
        assert_eq!(digest, expected);
    }

    #[test]
    fn type_hash_covers_referenced_structs() {
        let encoded = "Order(bool isBuy,Asset asset)Asset(address addr,uint256 amount)";
        assert_eq!(Order::eip712_encode_type(), encoded);

        let typed = typed_data("Order", &registry(), &BTreeMap::new()).unwrap();
        assert_eq!(typed.type_hash().unwrap(), keccak256(encoded));
    }

    #[test]
    fn unknown_primary_type_fails() {
        let err = Eip712Hasher
            .hash_struct("Missing", &registry(), &BTreeMap::new())
            .unwrap_err();
        assert!(matches!(err, Error::Hash(_) | Error::TypedData(_)));
    }
}
