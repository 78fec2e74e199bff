pub use super::bundle::Entity as Bundle;
pub use super::cellar::Entity as Cellar;
pub use super::cellar_invest::Entity as CellarInvest;
pub use super::factory::Entity as Factory;
pub use super::nflp::Entity as Nflp;
pub use super::pool::Entity as Pool;
pub use super::token::Entity as Token;
