use super::RapFactory;
use crate::types::{
    ActionParameters, ClaimBridgeIntent, ClaimBridgeParameters, ClaimIntent, ClaimParameters, Rap,
    RapAction,
};

impl RapFactory {
    /// Builds `[claim]`.
    pub fn create_claim_rap(intent: &ClaimIntent) -> Rap {
        Rap::new(vec![claim_action(intent)])
    }

    /// Builds `[claim, claimBridge?]`.
    ///
    /// The bridge leg is only added when the destination chain is known and differs from the
    /// chain the rewards sit on. A missing destination means the rewards stay where they are.
    pub fn create_claim_and_bridge_rap(intent: &ClaimBridgeIntent) -> Rap {
        let claim = ClaimIntent {
            address: intent.address,
            chain_id: intent.chain_id,
            asset: intent.asset.clone(),
            amount: intent.amount,
        };
        let mut actions = vec![claim_action(&claim)];

        if let Some(to_chain_id) = intent.to_chain_id
            && to_chain_id != intent.chain_id
        {
            actions.push(RapAction::new(ActionParameters::ClaimBridge(ClaimBridgeParameters {
                address: intent.address,
                chain_id: intent.chain_id,
                to_chain_id,
                asset: intent.asset.clone(),
                amount: intent.amount,
                quote: intent.quote.clone(),
            })));
        }

        Rap::new(actions)
    }
}

fn claim_action(intent: &ClaimIntent) -> RapAction {
    RapAction::new(ActionParameters::Claim(ClaimParameters {
        address: intent.address,
        chain_id: intent.chain_id,
        asset: intent.asset.clone(),
        amount: intent.amount,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        factory::tests::{OWNER, USDC},
        types::{ActionKind, Asset},
    };
    use alloy::primitives::U256;

    fn claim_bridge(to_chain_id: Option<u64>) -> ClaimBridgeIntent {
        ClaimBridgeIntent {
            address: OWNER,
            chain_id: 10,
            to_chain_id,
            asset: Asset::native(10),
            amount: U256::from(42),
            quote: None,
        }
    }

    #[test]
    fn claim_only() {
        let rap = RapFactory::create_claim_rap(&ClaimIntent {
            address: OWNER,
            chain_id: 1,
            asset: Asset::erc20(USDC, 1, 6),
            amount: U256::from(1),
        });
        assert_eq!(rap.kinds().collect::<Vec<_>>(), vec![ActionKind::Claim]);
    }

    #[test]
    fn same_chain_has_no_bridge_leg() {
        let rap = RapFactory::create_claim_and_bridge_rap(&claim_bridge(Some(10)));
        assert_eq!(rap.kinds().collect::<Vec<_>>(), vec![ActionKind::Claim]);
    }

    #[test]
    fn missing_destination_has_no_bridge_leg() {
        let rap = RapFactory::create_claim_and_bridge_rap(&claim_bridge(None));
        assert_eq!(rap.kinds().collect::<Vec<_>>(), vec![ActionKind::Claim]);
    }

    #[test]
    fn other_chain_appends_bridge_leg() {
        let rap = RapFactory::create_claim_and_bridge_rap(&claim_bridge(Some(8453)));

        assert_eq!(rap.kinds().collect::<Vec<_>>(), vec![ActionKind::Claim, ActionKind::ClaimBridge]);
        let ActionParameters::ClaimBridge(bridge) = &rap.actions[1].parameters else { panic!() };
        assert_eq!(bridge.chain_id, 10);
        assert_eq!(bridge.to_chain_id, 8453);
        assert_eq!(bridge.amount, U256::from(42));
    }
}
