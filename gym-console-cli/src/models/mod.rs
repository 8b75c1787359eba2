pub mod machine;
pub mod member;
pub mod plan;
pub mod session;
pub mod trainer;
pub mod user;

pub use machine::{Machine, MachineRequest, MachineUpdate};
pub use member::{Member, MemberCreateRequest, MemberUpdate, MembershipType};
pub use plan::{Plan, PlanRequest, PlanUpdate, Trainee};
pub use session::{SessionRequest, SessionStatus, SessionType, SessionUpdate, TrainingSession};
pub use trainer::{Trainer, TrainerCreateRequest, TrainerUpdate};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, RegisterResponse, Role, User};
