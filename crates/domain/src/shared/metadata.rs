use std::collections::HashMap;

/// Free form key/value pairs a client can attach to a `User`
pub type Metadata = HashMap<String, String>;
