// Calculator fixture - markers on the type, operations, parameters and return slots
use std::fmt;

#[api_description("Integer calculator")]
pub struct Calc {
    memory: i64,
}

impl Calc {
    pub fn new() -> Self {
        Calc { memory: 0 }
    }

    #[api_method]
    #[api_description("adds two numbers")]
    pub fn add(
        &self,
        #[api_required]
        #[api_description("first operand")]
        a: i64,
        b: i64,
    ) -> i64 {
        a + b
    }

    #[api_method]
    #[api_description("divides a by b")]
    #[api_return(min = 0)]
    pub fn div(
        &self,
        #[api_required] a: i64,
        #[api_required(true)]
        #[api_int_validation(min = 1, max = 1000)]
        b: i64,
    ) -> i64 {
        a / b
    }

    #[api_description("clears the memory register")]
    pub fn reset(&mut self) {
        self.memory = 0;
    }

    #[api_method]
    fn audit(&self) {}
}

impl fmt::Display for Calc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Calc({})", self.memory)
    }
}
