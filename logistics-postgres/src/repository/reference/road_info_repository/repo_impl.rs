use postgres_unit_of_work::Executor;

pub struct RoadInfoRepositoryImpl {
    pub executor: Executor,
}

impl RoadInfoRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}
