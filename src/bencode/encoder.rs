use super::Value;

/// Encode a Value into its canonical byte representation.
///
/// Dictionary keys are written in ascending raw-byte order no matter how the
/// dictionary was built, so equal values always encode to identical bytes.
pub fn encode(value: &Value) -> Vec<u8> {
    let mut result = Vec::new();
    encode_into(value, &mut result);
    result
}

fn encode_bytes(bytes: &[u8], output: &mut Vec<u8>) {
    output.extend_from_slice(bytes.len().to_string().as_bytes());
    output.push(b':');
    output.extend_from_slice(bytes);
}

fn encode_into(value: &Value, output: &mut Vec<u8>) {
    match value {
        Value::Integer(i) => {
            output.push(b'i');
            output.extend_from_slice(i.to_string().as_bytes());
            output.push(b'e');
        }
        Value::Bytes(b) => encode_bytes(b, output),
        Value::List(list) => {
            output.push(b'l');
            for item in list {
                encode_into(item, output);
            }
            output.push(b'e');
        }
        Value::Dict(dict) => {
            output.push(b'd');
            for (key, value) in dict.iter_sorted() {
                encode_bytes(key, output);
                encode_into(value, output);
            }
            output.push(b'e');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bencode::decode;

    #[test]
    fn test_integer_encoding() {
        assert_eq!(encode(&Value::Integer(42)), b"i42e");
        assert_eq!(encode(&Value::Integer(-42)), b"i-42e");
        assert_eq!(encode(&Value::Integer(0)), b"i0e");
    }

    #[test]
    fn test_string_encoding() {
        assert_eq!(encode(&Value::from("spam")), b"4:spam");
        assert_eq!(encode(&Value::bytes(Vec::new())), b"0:");
        assert_eq!(encode(&Value::bytes(vec![0xff, 0x00])), b"2:\xff\x00");
    }

    #[test]
    fn test_list_encoding() {
        let value = Value::list(vec![Value::from("spam"), Value::Integer(42)]);
        assert_eq!(encode(&value), b"l4:spami42ee");
    }

    #[test]
    fn test_dict_encoding_sorts_keys() {
        let unsorted = Value::dict(vec![
            ("foo", Value::Integer(42)),
            ("bar", Value::from("spam")),
        ])
        .unwrap();
        let sorted = Value::dict(vec![
            ("bar", Value::from("spam")),
            ("foo", Value::Integer(42)),
        ])
        .unwrap();

        assert_eq!(encode(&unsorted), b"d3:bar4:spam3:fooi42ee");
        assert_eq!(encode(&unsorted), encode(&sorted));
    }

    #[test]
    fn test_dict_keys_sort_by_raw_bytes() {
        let value = Value::dict(vec![
            (b"b".to_vec(), Value::Integer(1)),
            (b"B".to_vec(), Value::Integer(2)),
            (vec![0xff], Value::Integer(3)),
            (b"a".to_vec(), Value::Integer(4)),
        ])
        .unwrap();
        assert_eq!(encode(&value), b"d1:Bi2e1:ai4e1:bi1e1:\xffi3ee");
    }

    #[test]
    fn test_roundtrip_canonical_input() {
        let inputs: [&[u8]; 6] = [
            b"i-7e",
            b"0:",
            b"le",
            b"l4:spami42ee",
            b"d3:cow3:moo4:spam4:eggse",
            b"d8:announce5:hello4:infod6:lengthi3e6:pieces0:ee",
        ];
        for input in inputs {
            assert_eq!(encode(&decode(input).unwrap()), input);
        }
    }

    #[test]
    fn test_reencoding_unsorted_input_is_canonical() {
        let value = decode(b"d4:spam4:eggs3:cow3:mooe").unwrap();
        assert_eq!(encode(&value), b"d3:cow3:moo4:spam4:eggse");
    }
}
