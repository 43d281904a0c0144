//! Operation builders. Each returns a [`Request`](crate::Request) ready for
//! [`Client::send`](crate::Client::send).

mod objects;

pub use objects::{
    delete_object, get_object, get_object_with_headers, head_object, list_keys, object_path,
    put_object, put_public_object,
};
