use error_chain::error_chain;

error_chain! {
    errors {
        InvalidConfiguration(reason: String) {
            description("invalid maze configuration")
            display("invalid maze configuration: {}", reason)
        }
    }
}
