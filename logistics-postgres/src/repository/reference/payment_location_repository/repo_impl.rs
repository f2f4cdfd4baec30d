use postgres_unit_of_work::Executor;

pub struct PaymentLocationRepositoryImpl {
    pub executor: Executor,
}

impl PaymentLocationRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}
