#[macro_export]
macro_rules! assert_json_eq {
    ($value:expr, $json_string:expr$(,)?) => {
        match (&$value, &$json_string) {
            (value, json_string) => {
                use $crate::json::Infer;
                let json_left = serde_json::to_value(value)
                    .unwrap_or_else(|e|
                        panic!("failed to serialize \"{:?}\": {e}", value)
                    );
                let deserialized_right = value.same_inferred_type(
                    serde_json
                        ::from_str(AsRef::<str>::as_ref(json_string))
                        .unwrap_or_else(|e|
                            panic!("failed to deserialize \"{:?}\": {e}", json_string)
                        ),
                );
                let json_right = serde_json::to_value(&deserialized_right)
                    .unwrap_or_else(|e|
                        panic!("failed to reserialize \"{:?}\": {e}", json_string)
                    );
                if json_left != json_right {
                    panic!(
                        r#"assertion `left == right` failed
       left: {:?}
  json_left: {:?}
      right: {:?}
 json_right: {:?}"#,
                        value,
                        json_left,
                        json_string,
                        json_right,
                    )
                }
            }
        }
    };
}

pub trait Infer: Sized {
    fn same_inferred_type(&self, value: Self) -> Self {
        value
    }
}
impl<T> Infer for T {}
