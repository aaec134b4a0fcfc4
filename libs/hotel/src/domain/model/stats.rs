#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InsertStats {
    pub created: usize,
    pub updated: usize,
}

impl std::ops::Add for InsertStats {
    type Output = InsertStats;

    fn add(self, rhs: Self) -> Self {
        Self {
            created: self.created + rhs.created,
            updated: self.updated + rhs.updated,
        }
    }
}
