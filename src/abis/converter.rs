use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IBancorConverter {
        function connectorTokens(uint256 index) external view returns (address);
        function getConnectorBalance(address connectorToken) external view returns (uint256);
    }

    event Conversion(address indexed _fromToken, address indexed _toToken, address indexed _trader, uint256 _amount, uint256 _return, int256 _conversionFee);
}
