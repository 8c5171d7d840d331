// Intake schema checks applied before an order is stored or a preview is composed.
// The composer itself never validates; everything it trusts is enforced here.

pub mod validation;
