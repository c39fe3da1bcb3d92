// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CounterProposal, DateOffer, DateProposal, EmergencyContact, LikeStage, MatchEvent, MatchEventType,
    MatchWithUser, Preferences, ProfileMatch, ProposalStatus, User, WishList,
};
pub use requests::{NewContact, NewProposal, OfferRequest, PreferencesUpdate, ProfileUpdate, ResponseAction, WishListUpdate};
pub use responses::{Outcome, StoreSnapshot};
