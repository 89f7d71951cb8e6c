use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize_weights<S: Serializer>(weights: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
    // Convert f64 values to u64 bits for precise serialization
    let bits: Vec<u64> = weights.iter().map(|&f| f64::to_bits(f)).collect();

    bits.serialize(serializer)
}

pub fn deserialize_weights<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    // Convert u64 bits back to f64 values
    Vec::<u64>::deserialize(deserializer).map(|v| v.into_iter().map(f64::from_bits).collect())
}
