pub mod hex {
    use std::fmt;

    use serde::{
        de::{self, Deserializer, Visitor},
        ser::Serializer,
    };

    pub fn serialize<S>(value: &[u8; 64], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 64], D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(HexVisitor)
    }

    struct HexVisitor;

    impl<'de> Visitor<'de> for HexVisitor {
        type Value = [u8; 64];

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a 64-byte session key encoded as hex string")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v.len() != 128 {
                return Err(E::custom("key must be exactly 128 characters long"));
            }

            let mut data = [0; 64];
            hex::decode_to_slice(v, &mut data).map_err(E::custom)?;

            Ok(data)
        }
    }

    #[cfg(test)]
    mod tests {
        use serde::{Deserialize, Serialize};
        use serde_test::{Token, assert_de_tokens_error, assert_tokens};

        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Test {
            #[serde(with = "super")]
            key: [u8; 64],
        }

        #[test]
        fn valid() {
            const HEX: &str = "0101010101010101010101010101010101010101010101010101010101010101\
                               0101010101010101010101010101010101010101010101010101010101010101";
            let test = Test { key: [1; 64] };

            assert_tokens(
                &test,
                &[
                    Token::Struct {
                        name: "Test",
                        len: 1,
                    },
                    Token::Str("key"),
                    Token::Str(HEX),
                    Token::StructEnd,
                ],
            );
        }

        #[test]
        fn invalid_size() {
            assert_de_tokens_error::<Test>(
                &[
                    Token::Struct {
                        name: "Test",
                        len: 1,
                    },
                    Token::Str("key"),
                    Token::Str("0101"),
                    Token::StructEnd,
                ],
                "key must be exactly 128 characters long",
            );
        }

        #[test]
        fn invalid_hex() {
            const HEX: &str = "zz01010101010101010101010101010101010101010101010101010101010101\
                               0101010101010101010101010101010101010101010101010101010101010101";

            assert_de_tokens_error::<Test>(
                &[
                    Token::Struct {
                        name: "Test",
                        len: 1,
                    },
                    Token::Str("key"),
                    Token::Str(HEX),
                    Token::StructEnd,
                ],
                "Invalid character 'z' at position 0",
            );
        }
    }
}
